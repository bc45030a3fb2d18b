//! Report generation port trait.

use crate::domain::error::TickscopeError;
use crate::domain::pipeline::Analysis;
use std::path::Path;

/// Port for writing analysis reports.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), TickscopeError>;

    /// Default implementation: writes each analysis to the same path in turn,
    /// so only writers that append are useful with more than one product.
    fn write_all(&self, analyses: &[Analysis], output_path: &Path) -> Result<(), TickscopeError> {
        for analysis in analyses {
            self.write(analysis, output_path)?;
        }
        Ok(())
    }
}
