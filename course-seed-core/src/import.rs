use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::constants::{SCHEMA_FILE, SEED_FILE};
use crate::context::Context;
use crate::emit::seed_sql;
use crate::error::Result;
use crate::layout::ColumnLayout;
use crate::model::CourseGraph;
use crate::normalize::{normalize, NormalizeStats};
use crate::schema::SCHEMA_SQL;
use crate::sheet::read_rows;
use crate::summary::Summary;

/// Result of reading and normalizing one registrar export
#[derive(Debug, Clone)]
pub struct Import {
    pub graph: CourseGraph,
    pub stats: NormalizeStats,
}

impl Import {
    /// Read the export named by the context and normalize it
    pub fn load(ctx: &Context) -> Result<Self> {
        let layout = ColumnLayout::load(&ctx.columns_yaml)?;
        if !ctx.columns_yaml.is_empty() {
            info!("Using column layout from: {}", ctx.columns_yaml);
        }

        let rows = read_rows(Path::new(&ctx.input), ctx.sheet_index)?;
        let (graph, stats) = normalize(&rows, &layout)?;
        Ok(Import { graph, stats })
    }

    pub fn summary(&self) -> Summary {
        Summary::new(&self.graph, &self.stats)
    }

    pub fn seed_sql(&self) -> String {
        seed_sql(&self.graph)
    }

    /// Write `schema.sql` (unless seed-only) and `seed.sql` into the output
    /// directory, creating it when absent. Returns the paths written.
    pub async fn write(&self, ctx: &Context) -> Result<Vec<PathBuf>> {
        let output_dir = PathBuf::from(&ctx.output_dir);
        if let Err(err) = tokio::fs::create_dir_all(&output_dir).await {
            error!("Failed to create output directory '{}': {}", output_dir.display(), err);
            return Err(err.into());
        }

        let mut written = Vec::new();
        if !ctx.seed_only {
            let schema_path = output_dir.join(SCHEMA_FILE);
            write_output(&schema_path, SCHEMA_SQL).await?;
            written.push(schema_path);
        }

        let seed_path = output_dir.join(SEED_FILE);
        write_output(&seed_path, &self.seed_sql()).await?;
        written.push(seed_path);
        Ok(written)
    }
}

async fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Err(err) = tokio::fs::write(path, content).await {
        error!("Failed to write '{}': {}", path.display(), err);
        return Err(err.into());
    }
    info!("Wrote {}", path.display());
    Ok(())
}
