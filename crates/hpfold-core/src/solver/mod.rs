pub mod oracle;

pub use oracle::{Oracle, OracleError, ProcessOracle, Verdict};
