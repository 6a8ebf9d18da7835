// ============================================================================
// FORMAT HELPERS - Fechas, horas y texto para presentación
// ============================================================================
// Todas las fechas viajan como strings ISO ("2024-03-10T14:30:00", con o sin
// sufijo de zona). Aquí solo se parte y se recompone texto, sin aritmética.
// ============================================================================

/// Separar un datetime ISO en (fecha "YYYY-MM-DD", hora "HH:MM")
/// Acepta sufijo de segundos y/o zona horaria y los descarta
pub fn split_datetime(value: &str) -> Option<(String, String)> {
    let (date, rest) = value.split_once('T')?;
    if date.len() != 10 {
        return None;
    }
    let time = rest.get(0..5)?;
    if time.as_bytes().get(2) != Some(&b':') {
        return None;
    }
    Some((date.to_string(), time.to_string()))
}

/// Combinar fecha "YYYY-MM-DD" + hora "HH:MM" en un datetime ISO
pub fn combine_datetime(date: &str, time: &str) -> String {
    format!("{}T{}", date, time)
}

/// Fecha de un datetime ISO en formato de pantalla DD/MM/YYYY
/// Valores malformados producen cadena vacía, nunca error
pub fn format_date_display(value: &str) -> String {
    let date = match value.split_once('T') {
        Some((date, _)) => date,
        None => value,
    };
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day))
            if year.len() == 4 && month.len() == 2 && day.len() == 2 =>
        {
            format!("{}/{}/{}", day, month, year)
        }
        _ => String::new(),
    }
}

/// Hora de un datetime ISO en formato de pantalla HH:MM
pub fn format_time_display(value: &str) -> String {
    match split_datetime(value) {
        Some((_, time)) => time,
        None => String::new(),
    }
}

/// Primera letra en mayúscula (respeta caracteres multibyte)
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Escapar texto que se interpola en HTML construido con format!
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_datetime_separa_fecha_y_hora() {
        assert_eq!(
            split_datetime("2024-03-10T14:30:00"),
            Some(("2024-03-10".to_string(), "14:30".to_string()))
        );
    }

    #[test]
    fn split_datetime_ignora_zona_horaria() {
        assert_eq!(
            split_datetime("2024-03-10T14:30:00+02:00"),
            Some(("2024-03-10".to_string(), "14:30".to_string()))
        );
        assert_eq!(
            split_datetime("2024-03-10T09:05"),
            Some(("2024-03-10".to_string(), "09:05".to_string()))
        );
    }

    #[test]
    fn split_datetime_rechaza_malformados() {
        assert_eq!(split_datetime("2024-03-10"), None);
        assert_eq!(split_datetime("10/03/2024T14:30"), None);
        assert_eq!(split_datetime(""), None);
    }

    #[test]
    fn combine_datetime_une_fecha_y_hora() {
        assert_eq!(combine_datetime("2024-03-10", "14:30"), "2024-03-10T14:30");
    }

    #[test]
    fn formato_fecha_pantalla() {
        assert_eq!(format_date_display("2024-03-10T14:30:00"), "10/03/2024");
        assert_eq!(format_date_display("2024-03-10"), "10/03/2024");
        assert_eq!(format_date_display("no es fecha"), "");
        assert_eq!(format_date_display(""), "");
    }

    #[test]
    fn formato_hora_pantalla() {
        assert_eq!(format_time_display("2024-03-10T14:30:00"), "14:30");
        assert_eq!(format_time_display("2024-03-10"), "");
    }

    #[test]
    fn capitalize_first_respeta_acentos() {
        assert_eq!(capitalize_first("única etapa"), "Única etapa");
        assert_eq!(capitalize_first("descripción"), "Descripción");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn escape_html_neutraliza_marcado() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Ana & Luis"), "Ana &amp; Luis");
    }
}
