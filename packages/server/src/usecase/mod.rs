//! Use case layer: one use case per inbound event.
//!
//! Each use case binds a repository mutation to the fan-out side effects the
//! event requires (subscribe/unsubscribe), and hands the resulting fresh
//! snapshot back to the router, which decides which snapshot fields to
//! broadcast.

mod cast_vote;
mod clear_votes;
mod get_snapshot;
mod join_room;
mod leave_room;
mod set_reveal;

pub use cast_vote::CastVoteUseCase;
pub use clear_votes::ClearVotesUseCase;
pub use get_snapshot::GetSnapshotUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use set_reveal::SetRevealUseCase;
