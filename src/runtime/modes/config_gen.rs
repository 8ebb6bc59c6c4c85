//! Generate config command

use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::config::StaticConfig;

/// 生成示例配置
///
/// 未指定输出路径时打印到 stdout；目标文件已存在且未指定 `force` 时拒绝覆盖。
pub fn generate_config(output_path: Option<&str>, force: bool) -> Result<()> {
    let Some(path) = output_path else {
        print!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    };

    if !force && Path::new(path).exists() {
        bail!("{} already exists, pass --force to overwrite", path);
    }

    StaticConfig::default()
        .save_to_file(path)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", path, e))?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Set api.key (or the API_KEY environment variable) before starting the server".yellow()
    );
    Ok(())
}
