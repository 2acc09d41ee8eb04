use serde::Serialize;

use gdl_store::Record;
use gdl_types::{Document, Element};

use crate::decode::{expect_root, Decode};
use crate::error::{DecodeError, DecodeResult};
use crate::fields::Fields;

/// A game server advertised by the character list endpoint, keyed by name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    /// Host name or address (`<DNS>`).
    pub address: String,
    pub lat: f64,
    pub long: f64,
    /// Load factor reported by the endpoint, 0.0 to 1.0.
    pub usage: f64,
    pub admin_only: bool,
}

impl ServerInfo {
    const RECORD: &'static str = "Server";

    fn from_element(el: &Element, index: usize) -> DecodeResult<Self> {
        let name = el
            .child_text("Name")
            .filter(|n| !n.is_empty())
            .ok_or_else(|| DecodeError::MissingField {
                record: Self::RECORD,
                name: format!("#{index}"),
                field: "Name",
            })?;
        let f = Fields::new(Self::RECORD, name, el);
        Ok(Self {
            name: name.to_string(),
            address: f.required_text("DNS")?.to_string(),
            lat: f.optional("Lat")?.unwrap_or(0.0),
            long: f.optional("Long")?.unwrap_or(0.0),
            usage: f.optional("Usage")?.unwrap_or(0.0),
            admin_only: f.flag("AdminOnly")?,
        })
    }
}

impl Record for ServerInfo {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Decode for ServerInfo {
    const ROOT: &'static str = "Chars";

    /// Servers live under `<Chars><Servers>`; a list without the `<Servers>`
    /// element decodes to no servers.
    fn decode(doc: &Document) -> DecodeResult<Vec<Self>> {
        expect_root(doc, Self::ROOT)?;
        let Some(servers) = doc.root().child("Servers") else {
            return Ok(Vec::new());
        };
        servers
            .children_named(Self::RECORD)
            .enumerate()
            .map(|(i, el)| Self::from_element(el, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAR_LIST: &str = r#"<Chars nextCharId="2" maxNumChars="1">
  <Servers>
    <Server>
      <Name>USWest</Name>
      <DNS>52.8.0.1</DNS>
      <Lat>37.77</Lat>
      <Long>-122.42</Long>
      <Usage>0.25</Usage>
      <AdminOnly>false</AdminOnly>
    </Server>
    <Server>
      <Name>EUNorth</Name>
      <DNS>eunorth.example.net</DNS>
    </Server>
  </Servers>
</Chars>"#;

    #[test]
    fn decodes_servers() {
        let doc = Document::parse(CHAR_LIST).unwrap();
        let servers = ServerInfo::decode(&doc).unwrap();
        assert_eq!(servers.len(), 2);

        let west = &servers[0];
        assert_eq!(west.key(), "USWest");
        assert_eq!(west.address, "52.8.0.1");
        assert!((west.long + 122.42).abs() < 1e-9);
        assert!(!west.admin_only);

        assert_eq!(servers[1].usage, 0.0);
    }

    #[test]
    fn no_servers_element_is_empty() {
        let doc = Document::parse("<Chars/>").unwrap();
        assert!(ServerInfo::decode(&doc).unwrap().is_empty());
    }

    #[test]
    fn error_document_is_wrong_root() {
        let doc = Document::parse("<Error>Internal error</Error>").unwrap();
        assert!(matches!(
            ServerInfo::decode(&doc),
            Err(DecodeError::UnexpectedRoot { expected: "Chars", .. })
        ));
    }

    #[test]
    fn server_without_address_rejected() {
        let doc = Document::parse("<Chars><Servers><Server><Name>X</Name></Server></Servers></Chars>")
            .unwrap();
        assert!(matches!(
            ServerInfo::decode(&doc),
            Err(DecodeError::MissingField { field: "DNS", .. })
        ));
    }
}
