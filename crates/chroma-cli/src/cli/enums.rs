use clap::ValueEnum;

/// How `chroma analyze` prints its report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON report
    Json,
}
