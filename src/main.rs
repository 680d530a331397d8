use anyhow::Result;
use course_picker::config::{Config, DEFAULT_CONFIG_FILE};
use course_picker::utils::logging;
use course_picker::App;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config_path =
        std::env::var("COURSE_PICKER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config = Config::load(&config_path)?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 命令行参数拼成一个问题
    let args: Vec<String> = std::env::args().skip(1).collect();
    let query = (!args.is_empty()).then(|| args.join(" "));

    App::initialize(config)?.run(query).await?;

    Ok(())
}
