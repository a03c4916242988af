use clap::Parser;
use org_report::core::Pipeline;
use org_report::utils::error::{ErrorSeverity, ReportError};
use org_report::utils::{logger, validation::Validate};
use org_report::{CliConfig, LocalStorage, ReportEngine, ReportPipeline, ReportSettings};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let to_stdout = cli.stdout;

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting org-report");
    tracing::debug!("Settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let result = if to_stdout {
        print_report(settings).await
    } else {
        let pipeline = ReportPipeline::new(LocalStorage::default(), settings);
        ReportEngine::new(pipeline).run().await.map(|output_path| {
            println!("Report saved to: {}", output_path);
        })
    };

    if let Err(e) = result {
        tracing::error!(
            "Report generation failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
        exit_with(&e);
    }
}

async fn print_report(settings: ReportSettings) -> org_report::Result<()> {
    let pipeline = ReportPipeline::new(LocalStorage::default(), settings);
    let document = pipeline.extract().await?;
    let report = pipeline.transform(document).await?;
    print!("{}", report.to_csv()?);
    Ok(())
}

fn exit_with(e: &ReportError) -> ! {
    eprintln!("error: {}", e.user_friendly_message());
    eprintln!("hint: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
