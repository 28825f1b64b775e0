// ==========================================
// Starward UIGF 元数据同步 - 导出文件仓储
// ==========================================
// 职责: 将 Starward 方言文档写出为 JSON（缩进 2，非 ASCII 原样输出）
// 约束: 文档完整序列化后才创建目标文件
// ==========================================

use crate::domain::uigf::StarwardUigf;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

pub struct UigfExportRepository;

impl UigfExportRepository {
    #[instrument(skip(self, document, file_path), fields(users = document.hk4e.len()))]
    pub fn write_starward<P: AsRef<Path>>(
        &self,
        document: &StarwardUigf,
        file_path: P,
    ) -> RepositoryResult<()> {
        let path = file_path.as_ref();
        let content = serde_json::to_string_pretty(document)?;

        fs::write(path, content).map_err(|e| RepositoryError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "Starward UIGF 文件已写出");
        Ok(())
    }
}
