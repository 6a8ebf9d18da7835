use serde::{Deserialize, Serialize};

/// Contadores agregados del dashboard (/dashboard/stats/)
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct DashboardStats {
    pub today_count: u32,
    pub confirmed_count: u32,
    pub pending_count: u32,
    pub stages_count: u32,
    #[serde(default)]
    pub upcoming_appointments: Vec<UpcomingAppointment>,
}

/// Entrada de la lista de próximas citas del dashboard
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UpcomingAppointment {
    #[serde(default)]
    pub id: Option<u32>,
    pub date: String,
    pub visitor_name: String,
    #[serde(default)]
    pub stage_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_parsean_con_lista_ausente() {
        let json = r#"{
            "today_count": 3,
            "confirmed_count": 8,
            "pending_count": 2,
            "stages_count": 5
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.today_count, 3);
        assert!(stats.upcoming_appointments.is_empty());
    }

    #[test]
    fn stats_parsean_con_proximas_citas() {
        let json = r#"{
            "today_count": 1,
            "confirmed_count": 0,
            "pending_count": 4,
            "stages_count": 5,
            "upcoming_appointments": [
                {"id": 9, "date": "2024-03-12T10:00:00", "visitor_name": "Luis", "stage_name": "Infantil"}
            ]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.upcoming_appointments.len(), 1);
        assert_eq!(stats.upcoming_appointments[0].id, Some(9));
    }
}
