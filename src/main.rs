// ==========================================
// Starward UIGF 元数据同步 - 命令行入口
// ==========================================
// 用法:
//   starward-uigf-sync [--config <file>] reconcile <mapping.json> <starward.json> [store.json]
//   starward-uigf-sync [--config <file>] convert <store.json> <hutao.json> <out_dir>
//   starward-uigf-sync [--config <file>] export-pending <store.json> <sheet.csv>
//   starward-uigf-sync [--config <file>] apply-sheet <store.json> <sheet.csv>
// ==========================================

use anyhow::{bail, Context, Result};
use starward_uigf_sync::app::ConsoleAnswerProvider;
use starward_uigf_sync::i18n::{self, t, t_with_args};
use starward_uigf_sync::{logging, EngineError, MetaSyncPipeline, SessionState, SyncConfig};
use std::path::{Path, PathBuf};

fn usage() -> String {
    format!(
        "{}:\n  \
         starward-uigf-sync [--config <file>] reconcile <mapping.json> <starward.json> [store.json]\n  \
         starward-uigf-sync [--config <file>] convert <store.json> <hutao.json> <out_dir>\n  \
         starward-uigf-sync [--config <file>] export-pending <store.json> <sheet.csv>\n  \
         starward-uigf-sync [--config <file>] apply-sheet <store.json> <sheet.csv>",
        t("usage.header")
    )
}

fn main() -> Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = if args.first().map(String::as_str) == Some("--config") {
        if args.len() < 2 {
            bail!("{}", usage());
        }
        let path = PathBuf::from(args.remove(1));
        args.remove(0);
        Some(path)
    } else {
        None
    };

    let config = SyncConfig::load(config_path.as_deref()).context("加载配置失败")?;
    i18n::set_locale(&config.ui_locale);

    tracing::info!("{} v{}", starward_uigf_sync::APP_NAME, starward_uigf_sync::VERSION);

    let pipeline = MetaSyncPipeline::new(config);
    let command = args.first().map(String::as_str).unwrap_or("");
    let operands = args.get(1..).unwrap_or(&[]);

    match (command, operands) {
        ("reconcile", [mapping, starward]) => {
            let store = pipeline.config().resolve_store_path();
            run_reconcile(&pipeline, mapping, starward, &store)
        }
        ("reconcile", [mapping, starward, store]) => {
            run_reconcile(&pipeline, mapping, starward, Path::new(store))
        }
        ("convert", [store, hutao, out_dir]) => run_convert(&pipeline, store, hutao, out_dir),
        ("export-pending", [store, csv]) => {
            let count = pipeline
                .export_pending(store, csv)
                .with_context(|| format!("导出答题表失败: {}", csv))?;
            let count = count.to_string();
            println!(
                "{}",
                t_with_args(
                    "sheet.exported",
                    &[("count", count.as_str()), ("path", csv.as_str())]
                )
            );
            Ok(())
        }
        ("apply-sheet", [store, csv]) => {
            let summary = pipeline
                .apply_answer_sheet(store, csv)
                .with_context(|| format!("应用答题表失败: {}", csv))?;
            let fields = summary.fields_written.to_string();
            println!("{}", t_with_args("sheet.applied", &[("fields", fields.as_str())]));
            Ok(())
        }
        _ => bail!("{}", usage()),
    }
}

fn run_reconcile(
    pipeline: &MetaSyncPipeline,
    mapping: &str,
    starward: &str,
    store: &Path,
) -> Result<()> {
    if let Some(parent) = store.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("无法创建目录: {}", parent.display()))?;
    }

    let mut console = ConsoleAnswerProvider::stdio();
    let report = pipeline
        .reconcile(mapping, starward, store, &mut console)
        .context("元数据同步失败")?;

    match report.resolution.state {
        SessionState::Abandoned => println!("{}", t("resolve.abandoned")),
        _ => println!("{}", t("resolve.done")),
    }
    println!(
        "{}",
        t_with_args(
            "reconcile.summary",
            &[
                ("total", report.total_entries.to_string().as_str()),
                ("pending", report.pending_after.to_string().as_str()),
            ],
        )
    );
    println!(
        "{}",
        t_with_args("reconcile.saved", &[("path", store.display().to_string().as_str())])
    );
    Ok(())
}

fn run_convert(pipeline: &MetaSyncPipeline, store: &str, hutao: &str, out_dir: &str) -> Result<()> {
    let now = chrono::Local::now();
    match pipeline.convert_file(store, hutao, out_dir, &now) {
        Ok(path) => {
            println!(
                "{}",
                t_with_args("convert.done", &[("path", path.display().to_string().as_str())])
            );
            Ok(())
        }
        Err(EngineError::UnresolvedMetadata { item_id }) => {
            bail!("{}", t_with_args("convert.unresolved", &[("id", item_id.as_str())]))
        }
        Err(e) => Err(e).context("转换失败"),
    }
}
