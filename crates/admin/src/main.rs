use anyhow::Context;
use tradeline_admin::{AdminConfig, run};

fn main() -> anyhow::Result<()> {
    let config = AdminConfig::from_env()?;

    match config.log_format {
        Some(format) => tradeline_observability::tracing::init(format, "info"),
        None => tradeline_observability::init(),
    }
    config.log_defaults();

    let view = run(&config)?;
    let rendered = serde_json::to_string_pretty(&view).context("failed to render timeline view")?;
    println!("{rendered}");

    Ok(())
}
