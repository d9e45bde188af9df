//! 会话身份解析
//!
//! 每个会话只向协作方查询一次角色标志，之后全程使用缓存值。
//! 解析失败不阻塞页面使用，降级为访客身份。

use tracing::{debug, warn};

use super::NavigationSession;
use crate::models::identity::entities::Identity;

impl NavigationSession {
    /// 解析并缓存会话身份
    ///
    /// 任何失败（网络错误、非 2xx）都映射为访客，绝不向上传播。
    pub async fn resolve_identity(&self) -> Identity {
        *self
            .identity_cell()
            .get_or_init(|| async {
                match self.service().resolve_identity().await {
                    Ok(flags) => {
                        let identity = Identity::from_flags(&flags);
                        debug!("Identity resolved: role={}", identity.role);
                        identity
                    }
                    Err(e) => {
                        warn!("Identity resolution failed, continuing as guest: {e}");
                        Identity::guest()
                    }
                }
            })
            .await
    }

    /// 已缓存的身份（尚未解析时为 None）
    pub fn identity_if_resolved(&self) -> Option<Identity> {
        self.identity_cell().get().copied()
    }
}
