// ==========================================
// Smart Vista 能源与OEE仪表盘 - 数据仓储层
// ==========================================
// 职责: 只读参考数据集访问
// 说明: 数据集常驻内存, 读取方只见不可变引用;
//       无流式摄入, 变化仅来自配置层
// ==========================================

pub mod dataset;

pub use dataset::DatasetRepository;
