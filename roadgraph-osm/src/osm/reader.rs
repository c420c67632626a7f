use super::models::*;
use crate::error::ConvertError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Element which was just opened, with the attributes we need already copied out of the buffer
enum Opened {
    Node(OsmNode),
    Way(String),
    Nd(String),
    Tag(String, String),
    Other,
}

// Streams `node` and `way` elements out of an OSM XML document.
//
// Only the way currently being read is kept in memory, so the document size does not matter.
pub struct OsmXmlReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    // Number of currently open elements
    depth: usize,
    // Way being collected and the depth it was opened at
    way: Option<(OsmWay, usize)>,
    // The root element was closed, nothing but comments may follow
    root_closed: bool,
    finished: bool,
}

impl OsmXmlReader<BufReader<File>> {
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|source| ConvertError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(OsmXmlReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> OsmXmlReader<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);
        OsmXmlReader {
            reader,
            buf: Vec::new(),
            depth: 0,
            way: None,
            root_closed: false,
            finished: false,
        }
    }

    fn next_element(&mut self) -> Result<Option<OsmElement>, ConvertError> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => return Err(ConvertError::Parse { position, source }),
            };

            let (opened, empty) = match event {
                Event::Start(_) | Event::Empty(_) if self.root_closed => {
                    return Err(malformed(position, "content after the root element"));
                }
                Event::Start(ref e) => (open(e, position)?, false),
                Event::Empty(ref e) => (open(e, position)?, true),
                Event::Text(ref text) if self.depth == 0 => {
                    if text.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(malformed(position, "text outside of the root element"));
                    }
                    continue;
                }
                Event::End(_) => {
                    if self.depth == 0 {
                        return Err(malformed(position, "closing tag without an opening one"));
                    }
                    self.depth -= 1;
                    if self.depth == 0 {
                        self.root_closed = true;
                    }
                    if let Some((_, way_depth)) = self.way {
                        if way_depth == self.depth {
                            return Ok(self.way.take().map(|(way, _)| OsmElement::Way(way)));
                        }
                    }
                    continue;
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return Err(malformed(position, "document ended inside an open element"));
                    }
                    return Ok(None);
                }
                _ => continue,
            };

            let depth = self.depth;
            if depth == 0 && empty {
                self.root_closed = true;
            }
            if !empty {
                self.depth += 1;
            }

            match opened {
                Opened::Node(node) => return Ok(Some(OsmElement::Node(node))),
                Opened::Way(id) => {
                    let way = OsmWay {
                        id,
                        ..OsmWay::default()
                    };
                    if empty {
                        return Ok(Some(OsmElement::Way(way)));
                    }
                    self.way = Some((way, depth));
                }
                // `nd` and `tag` outside of a way belong to nodes or relations
                Opened::Nd(node_ref) => {
                    if let Some((way, _)) = self.way.as_mut() {
                        way.refs.push(node_ref);
                    }
                }
                Opened::Tag(key, value) => {
                    if let Some((way, _)) = self.way.as_mut() {
                        way.tags.push((key, value));
                    }
                }
                Opened::Other => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmXmlReader<R> {
    type Item = Result<OsmElement, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_element().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

fn open(e: &BytesStart<'_>, position: usize) -> Result<Opened, ConvertError> {
    let opened = match e.name().as_ref() {
        b"node" => {
            let id = required(e, "node", "id", position)?;
            let lon = coordinate(e, "lon", position)?;
            let lat = coordinate(e, "lat", position)?;
            Opened::Node(OsmNode { id, lon, lat })
        }
        b"way" => Opened::Way(required(e, "way", "id", position)?),
        b"nd" => Opened::Nd(required(e, "nd", "ref", position)?),
        b"tag" => Opened::Tag(
            required(e, "tag", "k", position)?,
            required(e, "tag", "v", position)?,
        ),
        _ => Opened::Other,
    };
    Ok(opened)
}

fn attribute(e: &BytesStart<'_>, key: &str, position: usize) -> Result<Option<String>, ConvertError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ConvertError::Parse {
            position,
            source: err.into(),
        })?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|source| ConvertError::Parse { position, source })?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required(e: &BytesStart<'_>, element: &str, key: &str, position: usize) -> Result<String, ConvertError> {
    attribute(e, key, position)?
        .ok_or_else(|| malformed(position, &format!("<{}> without `{}` attribute", element, key)))
}

fn coordinate(e: &BytesStart<'_>, key: &str, position: usize) -> Result<f64, ConvertError> {
    let value = required(e, "node", key, position)?;
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| malformed(position, &format!("invalid {} `{}`", key, value)))
}

fn malformed(position: usize, message: &str) -> ConvertError {
    ConvertError::Malformed {
        position,
        message: message.to_string(),
    }
}
