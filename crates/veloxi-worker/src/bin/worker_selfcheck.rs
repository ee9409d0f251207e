use std::path::Path;

use veloxi_render::{check_chromium, RenderConfig};
use veloxi_worker::WorkerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = WorkerConfig::from_env();

    println!(
        "worker-selfcheck: starting with storage_root={}",
        config.storage_root
    );
    ensure_storage_dirs(&config.storage_root).await?;
    ensure_chromium()?;
    ensure_env_present(&["REDIS_URL", "FAL_KEY", "MESH_API_BASE"])?;

    println!("worker-selfcheck: ok");
    Ok(())
}

async fn ensure_storage_dirs(root: &str) -> anyhow::Result<()> {
    let root = Path::new(root);
    tokio::fs::create_dir_all(root.join("assets/models")).await?;
    tokio::fs::create_dir_all(root.join("assets/images")).await?;
    Ok(())
}

fn ensure_chromium() -> anyhow::Result<()> {
    let path = check_chromium(&RenderConfig::from_env())
        .map_err(|e| anyhow::anyhow!("chromium not available: {}", e))?;
    println!("worker-selfcheck: chromium at {}", path.display());
    Ok(())
}

fn ensure_env_present(vars: &[&str]) -> anyhow::Result<()> {
    for var in vars {
        if std::env::var(var).is_err() {
            return Err(anyhow::anyhow!("missing required env var {}", var));
        }
    }
    Ok(())
}
