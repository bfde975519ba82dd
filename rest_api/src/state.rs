// rest_api/src/state.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directory::{
    fallback, AppContext, ContactInbox, DirectoryEntity, DoctorForm, EntityListStore, HospitalForm, LabForm,
    ListingForm, LoadMode, ShopForm,
};
use models::{Collection, Doctor, Hospital, Listing, MedicalShop, PathologyLab, ADMIN_ROLE};
use security::{ProviderSessions, SessionSource, TokenVerifier, VerifiedSessions};
use serde_json::json;
use storage_gateway::{AuthGateway, Gateway, InMemoryAuth, InMemoryGateway, StorageClient};
use tokio::sync::RwLock;
use tracing::info;

use crate::config::{BackendMode, RestApiConfig};

/// One admin store per listing kind, kept across requests.
pub struct AdminStores {
    pub doctors: RwLock<EntityListStore<Doctor>>,
    pub hospitals: RwLock<EntityListStore<Hospital>>,
    pub labs: RwLock<EntityListStore<PathologyLab>>,
    pub shops: RwLock<EntityListStore<MedicalShop>>,
}

impl Default for AdminStores {
    fn default() -> Self {
        Self {
            doctors: RwLock::new(EntityListStore::new(LoadMode::Admin)),
            hospitals: RwLock::new(EntityListStore::new(LoadMode::Admin)),
            labs: RwLock::new(EntityListStore::new(LoadMode::Admin)),
            shops: RwLock::new(EntityListStore::new(LoadMode::Admin)),
        }
    }
}

/// Ties a listing type to its admin form and admin store.
pub trait AdminListing: DirectoryEntity {
    type Form: ListingForm<Record = Self>;

    fn store(stores: &AdminStores) -> &RwLock<EntityListStore<Self>>;
}

impl AdminListing for Doctor {
    type Form = DoctorForm;

    fn store(stores: &AdminStores) -> &RwLock<EntityListStore<Self>> {
        &stores.doctors
    }
}

impl AdminListing for Hospital {
    type Form = HospitalForm;

    fn store(stores: &AdminStores) -> &RwLock<EntityListStore<Self>> {
        &stores.hospitals
    }
}

impl AdminListing for PathologyLab {
    type Form = LabForm;

    fn store(stores: &AdminStores) -> &RwLock<EntityListStore<Self>> {
        &stores.labs
    }
}

impl AdminListing for MedicalShop {
    type Form = ShopForm;

    fn store(stores: &AdminStores) -> &RwLock<EntityListStore<Self>> {
        &stores.shops
    }
}

// Shared state for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<AppContext>,
    pub sessions: Arc<dyn SessionSource>,
    pub admin: Arc<AdminStores>,
    pub inbox: Arc<RwLock<ContactInbox>>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, auth: Arc<dyn AuthGateway>, sessions: Arc<dyn SessionSource>) -> Self {
        Self {
            context: Arc::new(AppContext::start(gateway, auth)),
            sessions,
            admin: Arc::new(AdminStores::default()),
            inbox: Arc::new(RwLock::new(ContactInbox::with_demo_messages())),
        }
    }

    /// Builds the backend named by the configuration. In memory mode the
    /// demo admin account and, optionally, sample listings are created.
    pub async fn from_config(config: &RestApiConfig) -> Result<Self> {
        let (gateway, auth): (Arc<dyn Gateway>, Arc<dyn AuthGateway>) = match config.backend.mode {
            BackendMode::Remote => {
                let url = config.backend.url.as_deref().context("backend.url is not set")?;
                let api_key = config.backend.api_key.as_deref().context("backend.api_key is not set")?;
                let client = Arc::new(
                    StorageClient::new(url, api_key, Duration::from_secs(config.backend.timeout_secs))
                        .context("Failed to create the hosted backend client")?,
                );
                info!(%url, "using hosted backend");
                (client.clone() as Arc<dyn Gateway>, client as Arc<dyn AuthGateway>)
            }
            BackendMode::Memory => {
                let secret = config
                    .auth
                    .jwt_secret
                    .clone()
                    .unwrap_or_else(|| "in-memory-demo-signing-secret".to_string());
                let gateway = Arc::new(InMemoryGateway::new());
                let auth = Arc::new(InMemoryAuth::new(secret.into_bytes(), config.auth.token_ttl_secs));
                seed_demo(&gateway, &auth, config)
                    .await
                    .context("Failed to seed in-memory demo data")?;
                info!("using in-memory backend");
                (gateway as Arc<dyn Gateway>, auth as Arc<dyn AuthGateway>)
            }
        };

        let sessions: Arc<dyn SessionSource> = match &config.auth.jwt_secret {
            Some(secret) => Arc::new(VerifiedSessions::new(
                TokenVerifier::new(secret.as_bytes()),
                ProviderSessions::new(auth.clone()),
            )),
            None => Arc::new(ProviderSessions::new(auth.clone())),
        };
        Ok(Self::new(gateway, auth, sessions))
    }

    pub fn gateway(&self) -> Arc<dyn Gateway> {
        self.context.gateway()
    }

    pub fn auth(&self) -> Arc<dyn AuthGateway> {
        self.context.auth()
    }
}

async fn seed_demo(gateway: &InMemoryGateway, auth: &InMemoryAuth, config: &RestApiConfig) -> Result<()> {
    let admin_id = auth
        .register(&config.demo.admin_email, &config.demo.admin_password)
        .await
        .context("Failed to register the demo admin")?;
    gateway
        .seed(
            Collection::Profiles,
            vec![json!({
                "id": admin_id.as_str(),
                "email": config.demo.admin_email,
                "role": ADMIN_ROLE,
                "full_name": "Directory Admin",
            })],
        )
        .await;
    info!(email = %config.demo.admin_email, "demo admin account ready");

    if config.demo.seed_listings {
        gateway.seed(Collection::Doctors, rows(fallback::doctors())?).await;
        gateway.seed(Collection::Hospitals, rows(fallback::hospitals())?).await;
        gateway.seed(Collection::PathologyLabs, rows(fallback::pathology_labs())?).await;
        gateway.seed(Collection::MedicalShops, rows(fallback::medical_shops())?).await;
    }
    Ok(())
}

fn rows<T: Listing>(records: Vec<T>) -> Result<Vec<serde_json::Value>> {
    records
        .iter()
        .map(|record| record.to_row().context("Failed to encode demo listing"))
        .collect()
}
