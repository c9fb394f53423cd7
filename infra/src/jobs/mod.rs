//! Background job submission over Redis.

pub mod redis_queue;

pub use redis_queue::RedisJobQueue;
