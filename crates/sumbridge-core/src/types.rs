//! Core data types shared by the login flow and the report reshaper

use serde::{Deserialize, Deserializer, Serialize};

/// Cookies harvested from the portal during one login attempt.
///
/// Each entry is a `name=value` pair in the order the jar reports them.
/// The jar already dedupes by name/domain/path, so no deduplication happens
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCookies(Vec<String>);

impl SessionCookies {
    pub fn new(cookies: Vec<String>) -> Self {
        Self(cookies)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Iterate `(name, value)` pairs; entries without `=` are skipped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().filter_map(|c| c.split_once('='))
    }
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub message: String,
    pub cookies: SessionCookies,
}

/// One enrolled course in the service's stable output schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// School / program name
    #[serde(rename = "carrera")]
    pub school: String,
    /// Curriculum plan code
    pub plan: String,
    /// Study cycle
    #[serde(rename = "ciclo")]
    pub cycle: String,
    /// Subject name
    #[serde(rename = "curso")]
    pub subject: String,
    /// Section code
    #[serde(rename = "seccion")]
    pub section: String,
    /// Instructor full name: first, paternal and maternal names space-joined
    #[serde(rename = "profesor")]
    pub instructor: String,
}

/// Vendor report envelope: `{ data: { matricula: [...] } }`.
///
/// Unknown fields are ignored so the vendor can extend its payload.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorReport {
    pub data: VendorReportData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorReportData {
    pub matricula: Vec<VendorCourse>,
}

/// A raw course entry exactly as the portal reports it.
///
/// Fields may arrive as strings or bare numbers (`"codPlan": 2018`);
/// missing or `null` fields come through as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCourse {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub des_escuela: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub cod_plan: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub ciclo_estudio: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub des_asignatura: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub cod_seccion: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub nom_docente: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub ape_pat_docente: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub ape_mat_docente: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Number(n)) => n.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

impl From<VendorCourse> for CourseRecord {
    fn from(raw: VendorCourse) -> Self {
        let instructor = format!(
            "{} {} {}",
            raw.nom_docente, raw.ape_pat_docente, raw.ape_mat_docente
        );

        CourseRecord {
            school: raw.des_escuela,
            plan: raw.cod_plan,
            cycle: raw.ciclo_estudio,
            subject: raw.des_asignatura,
            section: raw.cod_seccion,
            instructor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_pairs() {
        let cookies = SessionCookies::new(vec!["a=1".into(), "broken".into(), "b=x=y".into()]);
        let pairs: Vec<_> = cookies.pairs().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "x=y")]);
    }

    #[test]
    fn test_vendor_course_ignores_unknown_fields() {
        let raw: VendorCourse = serde_json::from_value(serde_json::json!({
            "desEscuela": "Ingeniería de Software",
            "codPlan": "2018",
            "cicloEstudio": "5",
            "desAsignatura": "Redes",
            "codSeccion": "1",
            "nomDocente": "Ana",
            "apePatDocente": "Quispe",
            "apeMatDocente": "Rojas",
            "creditos": 4
        }))
        .unwrap();

        let record = CourseRecord::from(raw);
        assert_eq!(record.instructor, "Ana Quispe Rojas");
        assert_eq!(record.school, "Ingeniería de Software");
    }

    #[test]
    fn test_missing_name_part_keeps_stray_space() {
        let raw: VendorCourse = serde_json::from_value(serde_json::json!({
            "nomDocente": "Ana",
            "apePatDocente": null,
            "apeMatDocente": "Rojas"
        }))
        .unwrap();

        assert_eq!(CourseRecord::from(raw).instructor, "Ana  Rojas");
    }

    #[test]
    fn test_numeric_codes_are_stringified() {
        let raw: VendorCourse = serde_json::from_value(serde_json::json!({
            "desEscuela": "Ingeniería de Sistemas",
            "codPlan": 2018,
            "cicloEstudio": 6,
            "desAsignatura": "Compiladores",
            "codSeccion": 1,
            "nomDocente": "Jorge",
            "apePatDocente": "Ramos",
            "apeMatDocente": "Cruz"
        }))
        .unwrap();

        let record = CourseRecord::from(raw);
        assert_eq!(record.plan, "2018");
        assert_eq!(record.cycle, "6");
        assert_eq!(record.section, "1");
        assert_eq!(record.subject, "Compiladores");
    }

    #[test]
    fn test_nested_value_is_rejected() {
        let result: Result<VendorCourse, _> =
            serde_json::from_value(serde_json::json!({ "codPlan": { "id": 1 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_course_record_wire_names() {
        let record = CourseRecord {
            school: "s".into(),
            plan: "p".into(),
            cycle: "c".into(),
            subject: "n".into(),
            section: "x".into(),
            instructor: "i".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["carrera"], "s");
        assert_eq!(json["ciclo"], "c");
        assert_eq!(json["curso"], "n");
        assert_eq!(json["seccion"], "x");
        assert_eq!(json["profesor"], "i");
    }
}
