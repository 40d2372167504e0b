use agility_blog::core::Storage;
use agility_blog::utils::{logger, validation::Validate};
use agility_blog::{
    server, AgilityClient, BlogPage, CliConfig, Command, LocalStorage, MarkupTransform, Result,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.command {
        Command::Serve { json_logs: true, .. } => logger::init_json_logger(cli.verbose),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting agility-blog");

    if let Err(e) = run(cli).await {
        tracing::error!("❌ {}", e);
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    let config = cli.resolve()?;

    // 驗證配置
    config.validate()?;
    tracing::debug!("Resolved config: {:?}", config);

    let client = AgilityClient::new(config.agility.clone())?;
    let page = BlogPage::new(
        client,
        MarkupTransform::new(config.markup.rules.clone()),
        config.page.clone(),
    );

    match cli.command {
        Command::Render { output_path } => {
            let html = page.render().await?;
            match output_path {
                Some(dir) => {
                    let storage = LocalStorage::new(dir);
                    storage.write_file("index.html", html.as_bytes()).await?;
                    tracing::info!("✅ Page rendered successfully!");
                    println!("📁 Page saved to: {}", storage.full_path("index.html"));
                }
                None => println!("{}", html),
            }
        }
        Command::Serve { .. } => {
            server::start(page, &config.server.host, config.server.port).await?;
        }
    }

    Ok(())
}
