use answer_key_viewer::core::ConfigProvider;
use answer_key_viewer::utils::{logger, validation::Validate};
use answer_key_viewer::{
    CliConfig, HtmlPipeline, LoadStatus, LocalStorage, TomlConfig, ViewerEngine, ViewerError,
};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting answer-key-viewer");
    tracing::debug!("CLI config: {:?}", cli);

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(mut config) => {
                    config.apply_cli_overrides(&cli);
                    run(config).await
                }
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run<C: ConfigProvider + Validate + 'static>(config: C) -> Result<(), ViewerError> {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let exporter = config.pdf_path().map(|path| pdf_exporter(path.to_string()));
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = HtmlPipeline::new(storage, config);

    let mut engine = ViewerEngine::new(pipeline);
    if let Some(exporter) = exporter {
        engine = engine.with_exporter(exporter?);
    }

    let outcome = engine.run().await?;

    match outcome.status {
        LoadStatus::NoFileChosen => {
            println!("ℹ️  No file chosen, wrote placeholder page");
            println!("📁 Output saved to: {}", outcome.page_path);
        }
        LoadStatus::Rendered { modules, questions } => {
            println!("✅ Rendered {} modules with {} questions", modules, questions);
            println!("📁 Output saved to: {}", outcome.page_path);
            if let Some(pdf) = outcome.export_path {
                println!("📄 PDF saved to: {}", pdf.display());
            }
        }
        LoadStatus::Failed(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("📁 Error page saved to: {}", outcome.page_path);
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

#[cfg(feature = "pdf")]
fn pdf_exporter(
    path: String,
) -> Result<Box<dyn answer_key_viewer::core::ExportFacility>, ViewerError> {
    Ok(Box::new(
        answer_key_viewer::presentation::export::ChromiumPdfExporter::new(path),
    ))
}

#[cfg(not(feature = "pdf"))]
fn pdf_exporter(
    _path: String,
) -> Result<Box<dyn answer_key_viewer::core::ExportFacility>, ViewerError> {
    Err(ViewerError::ConfigError {
        message: "pdf export requires building with the `pdf` feature".to_string(),
    })
}
