use crate::constants::DEFAULT_CATALOG_URL;
use std::str::FromStr;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Select,
    Interior,
    Exterior,
}

impl FromStr for PageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "select" => Ok(PageKind::Select),
            "interior" => Ok(PageKind::Interior),
            "exterior" => Ok(PageKind::Exterior),
            other => Err(anyhow::anyhow!("unknown page kind {:?}", other)),
        }
    }
}

/// Runtime settings read from `<body data-page=".." data-catalog="..">`.
#[derive(Clone, Debug)]
pub struct PageConfig {
    pub page: PageKind,
    pub catalog_url: String,
}

impl PageConfig {
    pub fn from_document(document: &web::Document) -> anyhow::Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
        let data = body.dataset();
        let page = data
            .get("page")
            .ok_or_else(|| anyhow::anyhow!("missing data-page on <body>"))?
            .parse()?;
        let catalog_url = data
            .get("catalog")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());
        Ok(Self { page, catalog_url })
    }
}
