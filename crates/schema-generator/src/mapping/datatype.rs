//! Primitive datatypes of the supported vocabularies.

const SCHEMA_ORG: [&str; 2] = ["https://schema.org/", "http://schema.org/"];
const XML_SCHEMA: &str = "http://www.w3.org/2001/XMLSchema#";

/// A primitive datatype with a native representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeType {
    Boolean,
    Integer,
    Float,
    Text,
    Date,
    DateTime,
    Time,
    Interval,
}

impl NativeType {
    /// Type hint of the generated field.
    pub fn type_hint(&self) -> &'static str {
        match self {
            NativeType::Boolean => "bool",
            NativeType::Integer => "int",
            NativeType::Float => "float",
            NativeType::Text => "string",
            NativeType::Date | NativeType::DateTime | NativeType::Time => "\\DateTimeInterface",
            NativeType::Interval => "\\DateInterval",
        }
    }
}

/// Resolves a range identifier to its native type.
///
/// Both schema.org and XML Schema identifiers are recognized. A bare name
/// without namespace is read as a schema.org name.
pub fn native_type(uri: &str) -> Option<NativeType> {
    if let Some(local) = uri.strip_prefix(XML_SCHEMA) {
        return xml_schema_type(local);
    }

    let local = SCHEMA_ORG
        .iter()
        .find_map(|prefix| uri.strip_prefix(prefix))
        .or_else(|| (!uri.contains(['/', '#', ':'])).then_some(uri))?;

    schema_org_type(local)
}

fn schema_org_type(local: &str) -> Option<NativeType> {
    match local {
        "Boolean" | "False" | "True" => Some(NativeType::Boolean),
        "Integer" => Some(NativeType::Integer),
        "Number" | "Float" => Some(NativeType::Float),
        "Text" | "URL" | "CssSelectorType" | "PronounceableText" | "XPathType" => {
            Some(NativeType::Text)
        }
        "Date" => Some(NativeType::Date),
        "DateTime" => Some(NativeType::DateTime),
        "Time" => Some(NativeType::Time),
        "Duration" => Some(NativeType::Interval),
        _ => None,
    }
}

fn xml_schema_type(local: &str) -> Option<NativeType> {
    match local {
        "boolean" => Some(NativeType::Boolean),
        "integer" | "int" | "long" | "short" | "byte" | "nonNegativeInteger"
        | "positiveInteger" | "nonPositiveInteger" | "negativeInteger" | "unsignedInt"
        | "unsignedLong" => Some(NativeType::Integer),
        "decimal" | "double" | "float" => Some(NativeType::Float),
        "string" | "anyURI" | "normalizedString" | "token" | "language" => Some(NativeType::Text),
        "date" => Some(NativeType::Date),
        "dateTime" | "dateTimeStamp" => Some(NativeType::DateTime),
        "time" => Some(NativeType::Time),
        "duration" | "dayTimeDuration" | "yearMonthDuration" => Some(NativeType::Interval),
        _ => None,
    }
}
