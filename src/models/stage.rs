use serde::{Deserialize, Serialize};

/// Etapa educativa inyectada por la página anfitriona (window.SCHOOL_STAGES)
/// y usada como valor de filtro/selección en el panel de administración.
/// Solo el id es obligatorio; el resto tiene defaults de presentación.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Stage {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>, // token emoji ("👶", "🎨", ...)
    #[serde(default)]
    pub features: Vec<String>,
}

/// Curso perteneciente a una etapa; la lista vacía es una respuesta válida
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Course {
    pub id: u32,
    pub name: String,
}

/// Miembro del staff asignable a una etapa
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StaffOption {
    pub id: u32,
    pub name: String,
}

/// Glifos de icono de las tarjetas del catálogo
/// El backend manda un token emoji; cualquier token desconocido cae a Book
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StageIcon {
    Baby,
    PaintBrush,
    Book,
    Microscope,
    Graduation,
}

impl StageIcon {
    pub fn from_token(token: &str) -> Self {
        match token {
            "👶" => Self::Baby,
            "🎨" => Self::PaintBrush,
            "📚" => Self::Book,
            "🔬" => Self::Microscope,
            "🎓" => Self::Graduation,
            _ => Self::Book,
        }
    }

    /// Clases FontAwesome del glifo
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Baby => "fas fa-baby fa-lg",
            Self::PaintBrush => "fas fa-paint-brush fa-lg",
            Self::Book => "fas fa-book-open fa-lg",
            Self::Microscope => "fas fa-microscope fa-lg",
            Self::Graduation => "fas fa-graduation-cap fa-lg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_conocidos_mapean_a_su_glifo() {
        assert_eq!(StageIcon::from_token("👶"), StageIcon::Baby);
        assert_eq!(StageIcon::from_token("🎨"), StageIcon::PaintBrush);
        assert_eq!(StageIcon::from_token("📚"), StageIcon::Book);
        assert_eq!(StageIcon::from_token("🔬"), StageIcon::Microscope);
        assert_eq!(StageIcon::from_token("🎓"), StageIcon::Graduation);
    }

    #[test]
    fn token_desconocido_cae_al_libro() {
        assert_eq!(StageIcon::from_token("🚀"), StageIcon::Book);
        assert_eq!(StageIcon::from_token(""), StageIcon::Book);
        assert_eq!(StageIcon::from_token("book"), StageIcon::Book);
    }

    #[test]
    fn etapa_parsea_con_campos_ausentes() {
        let stage: Stage = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(stage.id, 4);
        assert_eq!(stage.name, None);
        assert!(stage.features.is_empty());
    }

    #[test]
    fn etapa_sin_id_no_parsea() {
        assert!(serde_json::from_str::<Stage>(r#"{"name": "Primaria"}"#).is_err());
    }
}
