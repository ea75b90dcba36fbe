/// Thread helpers for splitting work according to a [`Parallelism`](crate::Parallelism) value.
pub mod thread;
