pub mod cms;

// 重新导出常用类型和函数，方便外部使用
pub use cms::{
    client::{ClientConfig, CmsClient},
    entities::Entity,
    page::AdminPage,
    session::SessionContext,
    store::{DefaultStore, EntityStore, RemoteConfig, RemoteStore, StoreMode},
    sync::{EntitySyncer, MutationOutcome, NotificationListener, SyncState},
    types::{StoreError, StoreResult},
};
