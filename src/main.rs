use clap::{Parser, Subcommand};
use grobid_trainprep::{logger, App, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "trainprep", author, version, about = "GROBID 训练数据准备工具", long_about = None)]
struct Cli {
    /// TOML 配置文件
    #[arg(long, global = true, env = "TRAINPREP_CONFIG")]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true, env = "TRAINPREP_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 从样本清单下载开放获取 PDF 到输入阶段
    Sample {
        /// 批次目录
        batch_dir: PathBuf,
        /// 样本清单 CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// 每个期刊下载的 PDF 数
        #[arg(long)]
        per_journal: Option<usize>,
        /// 期刊数
        #[arg(long)]
        journals: Option<usize>,
    },
    /// 按模型类型整理修正后的训练文件到打包目录
    Package {
        /// 批次目录
        batch_dir: PathBuf,
        /// 在 stdout 输出 JSON 结果
        #[arg(long)]
        json: bool,
    },
    /// 提交 PDF 到 GROBID 生成训练数据
    Submit {
        /// 批次目录
        batch_dir: PathBuf,
        /// GROBID 服务地址
        #[arg(long)]
        url: Option<String>,
        /// 训练数据 flavor
        #[arg(long)]
        flavor: Option<String>,
        /// 重新生成已存在的压缩包
        #[arg(long)]
        overwrite: bool,
    },
    /// 解压生成的训练包
    Unzip {
        /// 批次目录
        batch_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // 帮助和版本信息不算错误
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // 初始化日志
    logger::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // 加载配置
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sample {
            batch_dir,
            csv,
            per_journal,
            journals,
        } => {
            if let Some(csv) = csv {
                config.sample_catalog = csv;
            }
            if let Some(n) = per_journal {
                config.sample_per_journal = n;
            }
            if let Some(n) = journals {
                config.sample_journals = n;
            }
            App::new(config).sample(&batch_dir).await
        }
        Commands::Package { batch_dir, json } => App::new(config).package(&batch_dir, json),
        Commands::Submit {
            batch_dir,
            url,
            flavor,
            overwrite,
        } => {
            if let Some(url) = url {
                config.grobid_url = url;
            }
            if flavor.is_some() {
                config.flavor = flavor;
            }
            App::new(config).submit(&batch_dir, overwrite).await
        }
        Commands::Unzip { batch_dir } => App::new(config).unzip(&batch_dir).await,
    }
}
