use serde::{Deserialize, Serialize};

/// Dirección de ordenación de una columna
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Parámetros de una página del listado (protocolo DataTables server-side).
/// El contador `draw` sube en cada request y el servidor lo devuelve tal
/// cual, lo que lo convierte en el token de supersesión: una respuesta cuyo
/// draw no es el vigente se descarta.
#[derive(Clone, PartialEq, Debug)]
pub struct ListingQuery {
    pub draw: u32,
    pub start: u32,
    pub length: u32,
    pub order_column: u32,
    pub order_dir: SortDir,
    pub search: String,
    pub stage: String,
    pub date: String,
    pub status: String,
}

impl ListingQuery {
    /// Pares clave/valor del query string: los obligatorios siempre,
    /// los filtros solo cuando no están vacíos
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("draw", self.draw.to_string()),
            ("start", self.start.to_string()),
            ("length", self.length.to_string()),
            ("order[0][column]", self.order_column.to_string()),
            ("order[0][dir]", self.order_dir.as_str().to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if !self.stage.is_empty() {
            pairs.push(("stage", self.stage.clone()));
        }
        if !self.date.is_empty() {
            pairs.push(("date", self.date.clone()));
        }
        if !self.status.is_empty() {
            pairs.push(("status", self.status.clone()));
        }
        pairs
    }
}

/// Fila del listado tal como la devuelve la API
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ListingRow {
    pub id: u32,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub visitor_name: String,
    #[serde(default)]
    pub visitor_email: String,
    #[serde(default)]
    pub visitor_phone: Option<String>,
    #[serde(default)]
    pub stage: Option<u32>,
    #[serde(default)]
    pub stage_name: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub staff_id: Option<u32>,
    #[serde(default)]
    pub staff_name: Option<String>,
}

/// Respuesta paginada del listado
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct ListingResponse {
    pub draw: u32,
    #[serde(rename = "recordsTotal")]
    pub records_total: u32,
    #[serde(rename = "recordsFiltered")]
    pub records_filtered: u32,
    pub data: Vec<ListingRow>,
    // La API incluye "error" en respuestas 500 junto a data vacía
    #[serde(default)]
    pub error: Option<String>,
}
