//! # GROBID Trainprep
//!
//! 为 GROBID flavour 模型准备训练数据的批处理工具
//!
//! ## 批次目录
//!
//! ```text
//! <batch>/
//!   0_pdf/                     输入 PDF
//!   1_generated/<doc>.zip      GROBID createTraining 返回的训练包
//!   1_generated/<doc>/         解压后的训练文件
//!   2_corrected/<doc>/...      人工修正后的训练文件
//!   2_collected/<doc>/...      收集后的训练文件（优先于 2_corrected）
//!   4_packaging/<model>/tei/   按模型整理的 TEI 文件
//!   4_packaging/<model>/raw/   按模型整理的原始文件（目前只有 segmentation）
//! ```
//!
//! ## 分层
//!
//! ### ① 数据模型（Models）
//! - `models/` - 批次布局、模型类型、文件名解析
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/` - 阶段选择、模型发现、打包目录、分类复制、统计、解压
//! - `clients/` - GROBID HTTP 客户端
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - `package` / `submit` / `unzip` 三条直线流程
//! - `app` - 命令入口，负责日志与统计输出

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{parse_tei_file_name, BatchLayout, ModelType, TeiName};
pub use orchestrator::{package_batch, PackageReport};
