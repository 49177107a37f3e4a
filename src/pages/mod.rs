use crate::assets;
use crate::config::PageConfig;
use crate::core::{PageQuery, Project};
use crate::dom;
use std::rc::Rc;

pub mod exterior;
pub mod interior;
pub mod select;

/// The project a page works on, resolved from the URL and the catalog.
pub struct Session {
    pub project_id: String,
    pub project: Rc<Project>,
    pub query: PageQuery,
}

impl Session {
    /// Any error here is fatal to the page: missing id, unknown id or a bad catalog.
    pub async fn open(cfg: &PageConfig) -> anyhow::Result<Self> {
        let query = PageQuery::parse(&dom::location_search());
        let project_id = query.project_id()?.to_string();
        let catalog = assets::load_catalog(&cfg.catalog_url).await?;
        let project = Rc::new(catalog.get(&project_id)?.clone());
        log::info!("[session] project {} ({})", project_id, project.project_name);
        Ok(Self {
            project_id,
            project,
            query,
        })
    }
}
