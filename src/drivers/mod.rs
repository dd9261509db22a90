
pub use self::in_memory_test::{
    InMemoryTestDriver, InMemoryTestResponseBuilder, InMemoryTestSession, RecordedQuery,
};
