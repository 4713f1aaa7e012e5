/// Machine word.
pub type Word = u32;

/// Signed machine word.
pub type SignedWord = i32;

/// Double machine word.
pub type DoubleWord = u64;

/// Signed double machine word.
pub type SignedDoubleWord = i64;
