// Project descriptor schema, catalog lookup and the derived view data
// (start room, variant model files, navigation targets, selector cards).

use crate::constants::DEFAULT_VARIANT_THUMBNAIL;
use fnv::FnvHashMap;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("no project id in the page URL")]
    MissingProjectId,
    #[error("unknown project: {0}")]
    UnknownProject(String),
    #[error("invalid project descriptor: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("project {0} has no interior rooms")]
    NoRooms(String),
    #[error("project {0} has no exterior model")]
    NoExterior(String),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MapCoords {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub tex: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub map_coords: MapCoords,
}

impl Room {
    /// Thumbnail file, falling back to the panorama itself.
    pub fn thumbnail_file(&self) -> &str {
        non_empty(self.thumbnail.as_deref()).unwrap_or(&self.tex)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interior {
    #[serde(default)]
    pub start_room: Option<String>,
    #[serde(default)]
    pub floorplan_image: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Interior {
    /// Room to open first: the requested id, else `startRoom`, else the first room.
    pub fn start_room_index(&self, requested: Option<&str>) -> usize {
        let wanted = non_empty(requested).or(non_empty(self.start_room.as_deref()));
        wanted
            .and_then(|id| self.rooms.iter().position(|r| r.id == id))
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Variant {
    pub name: String,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl Variant {
    pub fn thumbnail_file(&self) -> &str {
        non_empty(self.thumbnail.as_deref()).unwrap_or(DEFAULT_VARIANT_THUMBNAIL)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Exterior {
    #[serde(rename = "modelAndroid")]
    pub model_android: String,
    #[serde(rename = "modelIOS")]
    pub model_ios: String,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// glTF/USDZ pair for one exterior variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelFiles {
    pub android: String,
    pub ios: String,
}

fn with_suffix(file: &str, ext: &str, suffix: &str) -> String {
    let stem = file.strip_suffix(ext).unwrap_or(file);
    format!("{stem}{suffix}{ext}")
}

impl Exterior {
    /// Parse the `variant` query value; anything unusable selects variant 0.
    pub fn variant_index(&self, requested: Option<&str>) -> usize {
        requested
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&i| i < self.variants.len())
            .unwrap_or(0)
    }

    pub fn model_files(&self, variant_index: usize) -> ModelFiles {
        match self
            .variants
            .get(variant_index)
            .and_then(|v| non_empty(v.suffix.as_deref()))
        {
            Some(suffix) => ModelFiles {
                android: with_suffix(&self.model_android, ".glb", suffix),
                ios: with_suffix(&self.model_ios, ".usdz", suffix),
            },
            None => ModelFiles {
                android: self.model_android.clone(),
                ios: self.model_ios.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: String,
    #[serde(default)]
    pub assets_path: String,
    #[serde(default)]
    pub exterior: Option<Exterior>,
    #[serde(default)]
    pub interior: Option<Interior>,
}

impl Project {
    #[inline]
    pub fn asset_url(&self, file: &str) -> String {
        format!("{}{}", self.assets_path, file)
    }

    pub fn rooms(&self) -> &[Room] {
        self.interior.as_ref().map(|i| i.rooms.as_slice()).unwrap_or(&[])
    }

    pub fn variants(&self) -> &[Variant] {
        self.exterior
            .as_ref()
            .map(|e| e.variants.as_slice())
            .unwrap_or(&[])
    }
}

/// All projects in the descriptor file, keyed by project id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    projects: FnvHashMap<String, Project>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, ProjectError> {
        let projects: FnvHashMap<String, Project> = serde_json::from_str(text)?;
        Ok(Self { projects })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Project, ProjectError> {
        self.projects
            .get(id)
            .ok_or_else(|| ProjectError::UnknownProject(id.to_string()))
    }
}

/// The query parameters every page understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub id: Option<String>,
    pub variant: Option<String>,
    pub room: Option<String>,
}

impl PageQuery {
    /// Parse a `?id=..&variant=..&room=..` string (leading `?` optional).
    pub fn parse(search: &str) -> Self {
        let mut q = PageQuery::default();
        let raw = search.strip_prefix('?').unwrap_or(search);
        for (k, v) in url::form_urlencoded::parse(raw.as_bytes()) {
            let slot = match k.as_ref() {
                "id" => &mut q.id,
                "variant" => &mut q.variant,
                "room" => &mut q.room,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(v.into_owned());
            }
        }
        q
    }

    pub fn project_id(&self) -> Result<&str, ProjectError> {
        non_empty(self.id.as_deref()).ok_or(ProjectError::MissingProjectId)
    }
}

/// A page the selector can navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewTarget {
    Exterior { variant: Option<usize> },
    Interior { room: Option<String> },
}

impl ViewTarget {
    pub fn url(&self, project_id: &str) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        ser.append_pair("id", project_id);
        let page = match self {
            ViewTarget::Exterior { variant } => {
                if let Some(v) = variant {
                    ser.append_pair("variant", &v.to_string());
                }
                "exterior"
            }
            ViewTarget::Interior { room } => {
                if let Some(r) = room {
                    ser.append_pair("room", r);
                }
                "interior"
            }
        };
        format!("{page}?{}", ser.finish())
    }
}

/// One swipeable destination on the select page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub desc: String,
    pub image_url: String,
    pub icon: String,
    pub target_url: String,
}

const EXTERIOR_COVER: &str =
    "https://images.unsplash.com/photo-1486325212027-8081e485255e?w=800&q=80";
const INTERIOR_COVER: &str =
    "https://images.unsplash.com/photo-1618221195710-dd6b41faaea6?w=800&q=80";

/// Overview card followed by one card per exterior variant.
pub fn exterior_cards(project: &Project, project_id: &str) -> Vec<Card> {
    let mut cards = vec![Card {
        title: "Exterior".into(),
        subtitle: "Model view".into(),
        desc: "View the building model in your own surroundings.".into(),
        image_url: EXTERIOR_COVER.into(),
        icon: "landscape".into(),
        target_url: ViewTarget::Exterior { variant: None }.url(project_id),
    }];
    cards.extend(project.variants().iter().enumerate().map(|(i, v)| Card {
        title: v.name.clone(),
        subtitle: "Unit type".into(),
        desc: "Explore the floor plan and model of this unit type.".into(),
        image_url: project.asset_url(v.thumbnail_file()),
        icon: "apartment".into(),
        target_url: ViewTarget::Exterior { variant: Some(i) }.url(project_id),
    }));
    cards
}

/// Overview card followed by one card per interior room.
pub fn interior_cards(project: &Project, project_id: &str) -> Vec<Card> {
    let mut cards = vec![Card {
        title: "Interior".into(),
        subtitle: "Inside view".into(),
        desc: "Explore the apartment with your phone.".into(),
        image_url: INTERIOR_COVER.into(),
        icon: "chair".into(),
        target_url: ViewTarget::Interior { room: None }.url(project_id),
    }];
    cards.extend(project.rooms().iter().map(|r| Card {
        title: r.name.clone(),
        subtitle: "Room view".into(),
        desc: format!("See the {} in 360 degrees.", r.name),
        image_url: project.asset_url(r.thumbnail_file()),
        icon: "360".into(),
        target_url: ViewTarget::Interior {
            room: Some(r.id.clone()),
        }
        .url(project_id),
    }));
    cards
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

impl Platform {
    pub fn from_user_agent(ua: &str) -> Self {
        if ["iPad", "iPhone", "iPod"].iter().any(|d| ua.contains(d)) {
            Platform::Ios
        } else if ua.contains("Android") {
            Platform::Android
        } else {
            Platform::Other
        }
    }
}

#[inline]
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
