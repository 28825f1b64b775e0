// ==========================================
// Starward UIGF 元数据同步 - 元数据库仓储
// ==========================================
// 存储: 单个 JSON 文件 {"by_id": {...}}
// 读取: 缺少 by_id 视为空库；根节点或条目结构不符为 FormatError
// 写入: 整库序列化后一次性覆盖写入（非追加），非 ASCII 字符原样输出
// 限制: 不加文件锁，同一文件不支持多进程并发运行
// ==========================================

use crate::domain::meta::{MetadataEntry, MetadataStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, instrument};

// 文件根结构（by_id 可缺省）
#[derive(Debug, Deserialize)]
struct StoreFile {
    #[serde(default)]
    by_id: BTreeMap<String, MetadataEntry>,
}

pub struct MetaStoreRepository;

impl MetaStoreRepository {
    /// 读取元数据库
    ///
    /// # 返回
    /// - Ok(MetadataStore): 读取结果；条目 item_id 为空时以键补齐
    /// - Err(FileReadError): 文件无法读取（含不存在）
    /// - Err(FormatError): 非法 JSON / 根节点不是对象 / 条目结构不符
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(&self, file_path: P) -> RepositoryResult<MetadataStore> {
        let path = file_path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| RepositoryError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let store = self.parse(path, &content)?;
        info!(entries = store.len(), "元数据库读取完成");
        Ok(store)
    }

    /// 读取元数据库；文件不存在时返回空库
    ///
    /// # 返回
    /// - Ok((store, existed)): existed=false 表示文件不存在
    pub fn load_or_default<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> RepositoryResult<(MetadataStore, bool)> {
        let path = file_path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok((self.parse(path, &content)?, true)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "元数据库不存在，使用空库");
                Ok((MetadataStore::new(), false))
            }
            Err(e) => Err(RepositoryError::FileReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// 覆盖写入元数据库
    #[instrument(skip(self, store, file_path), fields(entries = store.len()))]
    pub fn save<P: AsRef<Path>>(&self, store: &MetadataStore, file_path: P) -> RepositoryResult<()> {
        let path = file_path.as_ref();

        // 先完整序列化，再一次性写入
        let content = serde_json::to_string_pretty(store)?;
        fs::write(path, content).map_err(|e| RepositoryError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(path = %path.display(), "元数据库已保存");
        Ok(())
    }

    fn parse(&self, path: &Path, content: &str) -> RepositoryResult<MetadataStore> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let file: StoreFile =
            serde_json::from_str(content).map_err(|e| RepositoryError::FormatError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut store = MetadataStore::new();
        for (key, mut entry) in file.by_id {
            if entry.item_id.is_empty() {
                entry.item_id = key.clone();
            }
            store.restore_entry(key, entry);
        }
        Ok(store)
    }
}
