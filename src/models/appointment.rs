use serde::{Deserialize, Serialize};

/// Cita completa tal como la devuelve la API (GET {base}/{id}/)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Appointment {
    pub id: u32,
    pub date: String, // ISO "YYYY-MM-DDTHH:MM:SS" (con o sin zona)
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub stage: u32,
    #[serde(default)]
    pub stage_name: Option<String>,
    #[serde(default)]
    pub course: Option<u32>,
    #[serde(default)]
    pub duration: Option<u32>,
    pub status: String,
    #[serde(default)]
    pub comments: Option<String>,

    // Campos avanzados (solo en modo avanzado)
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_date: Option<String>,

    #[serde(default)]
    pub staff: Option<u32>,
}

/// Cuerpo JSON de POST/PUT de citas
/// Los opcionales ausentes se omiten del cuerpo, no se envían como null
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct AppointmentPayload {
    pub date: String, // fecha+hora ya combinadas
    pub visitor_name: String,
    pub visitor_email: String,
    pub visitor_phone: String,
    pub stage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<u32>,
    pub status: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff: Option<u32>,
}

/// Estados conocidos de una cita
/// El wire manda el código en minúsculas; los desconocidos no rompen el
/// render, caen al badge neutro (ver `status_badge`)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Código que viaja por la API
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Texto visible en la tabla y el filtro
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Completed => "Realizada",
            Self::Cancelled => "Cancelada",
        }
    }

    /// Clase Bootstrap del badge
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Pending => "bg-warning",
            Self::Completed => "bg-success",
            Self::Cancelled => "bg-danger",
        }
    }

    pub const ALL: [AppointmentStatus; 3] = [Self::Pending, Self::Completed, Self::Cancelled];
}

/// (clase, texto) del badge para cualquier status recibido
/// Un status fuera del enum se muestra tal cual con badge neutro
pub fn status_badge(raw: &str) -> (&'static str, String) {
    match AppointmentStatus::parse(raw) {
        Some(status) => (status.badge_class(), status.label().to_string()),
        None if raw.is_empty() => ("bg-secondary", "N/A".to_string()),
        None => ("bg-secondary", raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_conocidos_y_sus_badges() {
        assert_eq!(status_badge("pending"), ("bg-warning", "Pendiente".to_string()));
        assert_eq!(status_badge("completed"), ("bg-success", "Realizada".to_string()));
        assert_eq!(status_badge("cancelled"), ("bg-danger", "Cancelada".to_string()));
    }

    #[test]
    fn status_desconocido_cae_a_badge_neutro() {
        assert_eq!(status_badge("archived"), ("bg-secondary", "archived".to_string()));
        assert_eq!(status_badge(""), ("bg-secondary", "N/A".to_string()));
    }

    #[test]
    fn parse_y_code_son_inversos() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.code()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("Pendiente"), None);
    }

    #[test]
    fn payload_omite_opcionales_ausentes() {
        let payload = AppointmentPayload {
            date: "2024-03-10T14:30".to_string(),
            visitor_name: "Ana García".to_string(),
            visitor_email: "ana@example.com".to_string(),
            visitor_phone: "612345678".to_string(),
            stage: 2,
            course: None,
            status: "pending".to_string(),
            duration: 45,
            comments: None,
            notes: None,
            follow_up_date: None,
            staff: Some(7),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["stage"], 2);
        assert_eq!(json["duration"], 45);
        assert_eq!(json["date"], "2024-03-10T14:30");
        assert_eq!(json["staff"], 7);
        assert!(json.get("course").is_none());
        assert!(json.get("comments").is_none());
        assert!(json.get("notes").is_none());
        assert!(json.get("follow_up_date").is_none());
    }

    #[test]
    fn cita_parsea_respuesta_minima() {
        let json = r#"{
            "id": 7,
            "date": "2024-03-10T14:30:00",
            "visitor_name": "Ana",
            "visitor_email": "ana@example.com",
            "visitor_phone": "612345678",
            "stage": 3,
            "status": "pending"
        }"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, 7);
        assert_eq!(appointment.course, None);
        assert_eq!(appointment.duration, None);
        assert_eq!(appointment.staff, None);
    }
}
