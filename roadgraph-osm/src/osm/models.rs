// Node is the OpenStreetMap node, coordinates in decimal degrees WGS84
#[derive(Clone, Debug, PartialEq)]
pub struct OsmNode {
    pub id: String,
    pub lon: f64,
    pub lat: f64,
}

// Way as represented in OpenStreetMap: node references and tags in document order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsmWay {
    pub id: String,
    pub refs: Vec<String>,
    pub tags: Vec<(String, String)>,
}

impl OsmWay {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// Top-level element of the document the converter cares about
#[derive(Clone, Debug, PartialEq)]
pub enum OsmElement {
    Node(OsmNode),
    Way(OsmWay),
}
