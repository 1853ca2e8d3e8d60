//! 管理端首页统计

use crate::cms::client::CmsClient;
use crate::cms::entities::{Entity, Portfolio, Pricing, Service, Testimonial};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub services: usize,
    pub portfolio: usize,
    pub testimonials: usize,
    pub pricing: usize,
}

impl DashboardStats {
    /// (标题, 数量)，按首页卡片顺序
    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Services", self.services),
            ("Total Portfolio", self.portfolio),
            ("Total Testimonials", self.testimonials),
            ("Total Pricing", self.pricing),
        ]
    }
}

async fn count<T: Entity>(client: &CmsClient) -> usize {
    match client.store::<T>().list().await {
        Ok(rows) => rows.len(),
        Err(e) => {
            warn!("[Dashboard] 统计 {} 失败: {}", T::NAME, e);
            0
        }
    }
}

/// 各实体当前数据来源下的行数；读取失败计为 0
pub async fn load_stats(client: &CmsClient) -> DashboardStats {
    let (services, portfolio, testimonials, pricing) = tokio::join!(
        count::<Service>(client),
        count::<Portfolio>(client),
        count::<Testimonial>(client),
        count::<Pricing>(client),
    );
    DashboardStats {
        services,
        portfolio,
        testimonials,
        pricing,
    }
}
