/// Machine word.
pub type Word = u64;

/// Signed machine word.
pub type SignedWord = i64;

/// Double machine word.
pub type DoubleWord = u128;

/// Signed double machine word.
pub type SignedDoubleWord = i128;
