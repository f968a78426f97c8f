// ==========================================
// 班级体测薄弱项分析系统 - 命令行入口
// ==========================================
// 用法:
//   fitness-class-profile analyze <file> [class_name]
//   fitness-class-profile batch <dir> [max_count]
//   fitness-class-profile list
//   fitness-class-profile delete <class_name>
//
// 配置见 AppConfig::from_env（画像文件路径 / 映射表 / 超时）
// 结果以 JSON 输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use fitness_class_profile::{logging, AppConfig, ClassProfileApi};
use serde::Serialize;
use std::path::Path;

const USAGE: &str = "用法:
  fitness-class-profile analyze <file> [class_name]
  fitness-class-profile batch <dir> [max_count]
  fitness-class-profile list
  fitness-class-profile delete <class_name>";

fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::from_env().context("加载配置失败")?;
    tracing::info!(
        "{} v{} | 画像文件: {}",
        fitness_class_profile::APP_NAME,
        fitness_class_profile::VERSION,
        config.profile_store_path.display()
    );
    let api = ClassProfileApi::new(config);

    let mut args = std::env::args().skip(1);
    let command = args.next().ok_or_else(|| anyhow!(USAGE))?;

    match command.as_str() {
        "analyze" => {
            let file = args.next().ok_or_else(|| anyhow!("缺少文件路径\n{}", USAGE))?;
            let class_name = args.next();
            let profile = api.analyze_file(Path::new(&file), class_name.as_deref())?;
            print_json(&profile)
        }
        "batch" => {
            let dir = args.next().ok_or_else(|| anyhow!("缺少目录路径\n{}", USAGE))?;
            let max_count = args
                .next()
                .map(|raw| raw.parse::<usize>().with_context(|| format!("max_count 无效: {}", raw)))
                .transpose()?;
            let report = api.batch_analyze_dir(Path::new(&dir), max_count)?;
            print_json(&report)
        }
        "list" => print_json(&api.list_profiles()?),
        "delete" => {
            let class_name = args.next().ok_or_else(|| anyhow!("缺少班级名称\n{}", USAGE))?;
            let deleted = api.delete_profile(&class_name)?;
            print_json(&serde_json::json!({ "class_name": class_name, "deleted": deleted }))
        }
        other => bail!("未知命令: {}\n{}", other, USAGE),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
