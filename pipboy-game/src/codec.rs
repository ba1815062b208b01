//! XML document codec.
//!
//! A stored document is a UTF-8 file holding an XML declaration, a stylesheet
//! processing instruction and a single root element named after the object's
//! registry tag. Children follow the declaration order of the type's fields.
//!
//! Encoding is deterministic: one tab per nesting level, `\n` line endings and
//! no wall-clock data, so identical objects produce identical bytes.
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesPI, BytesText, Event};
use quick_xml::se::Serializer;
use quick_xml::{Reader, SeError};
use serde::Serialize;
use serde::ser::Error as _;

use crate::constants::{
    DEFAULT_STYLESHEET_HREF, DOCUMENT_EXTENSION, INDENT_CHAR, INDENT_SIZE, STYLESHEET_TARGET,
    XML_ENCODING, XML_VERSION,
};
use crate::entities::{
    BloatFly, DeathClaw, Dog, Entity, Feral, Ghoul, Human, NightStalker, Nightkin, Player, Robot,
    SuperMutant,
};
use crate::error::PersistError;
use crate::items::{Aid, Ammo, HeadPiece, Item, Misc, TorsoPiece, Weapon};
use crate::record::{DomainObject, Persist, Record};
use crate::registry::{ConcreteType, resolve_concrete_type};
use crate::world::{Location, Perk};

/// Encodes and decodes stored documents.
///
/// The codec holds no state besides the stylesheet it references; every call
/// opens, transforms and closes its own file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCodec {
    stylesheet_href: String,
}

impl Default for DocumentCodec {
    fn default() -> Self {
        Self::new(DEFAULT_STYLESHEET_HREF)
    }
}

impl DocumentCodec {
    #[must_use]
    pub fn new(stylesheet_href: impl Into<String>) -> Self {
        Self {
            stylesheet_href: stylesheet_href.into(),
        }
    }

    #[must_use]
    pub fn stylesheet_href(&self) -> &str {
        &self.stylesheet_href
    }

    /// Render `object` as document text without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::UnsupportedObject`] for types outside the
    /// persistable hierarchy and [`PersistError::Serialize`] if a field
    /// cannot be written.
    pub fn to_document<R: Record>(&self, object: &R) -> Result<String, PersistError> {
        let concrete = supported_type(object)?;
        let tag = concrete.tag();

        let mut document = self.header().map_err(|source| PersistError::Serialize { tag, source })?;
        let mut serializer = Serializer::with_root(&mut document, Some(tag))
            .map_err(|source| PersistError::Serialize { tag, source })?;
        serializer.indent(INDENT_CHAR, INDENT_SIZE);
        object
            .serialize(serializer)
            .map_err(|source| PersistError::Serialize { tag, source })?;
        document.push('\n');
        Ok(document)
    }

    /// Write `object` to `<directory>/<name>.xml`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::DirectoryNotFound`] if `directory` does not
    /// exist, [`PersistError::UnsupportedObject`] for types outside the
    /// persistable hierarchy (no file is created),
    /// [`PersistError::InvalidStorageKey`] for a name that would escape
    /// `directory` (no file is created), or [`PersistError::Io`]
    /// if the file cannot be written.
    pub fn encode<R: Record>(&self, directory: &Path, object: &R) -> Result<PathBuf, PersistError> {
        if !directory.is_dir() {
            return Err(PersistError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }
        let document = self.to_document(object)?;
        let path = storage_path(directory, object)?;

        let file = File::create(&path).map_err(|source| PersistError::io(&path, source))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(document.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|source| PersistError::io(&path, source))?;

        log::debug!("encoded {} to {}", object.type_name(), path.display());
        Ok(path)
    }

    fn header(&self) -> Result<String, SeError> {
        let mut writer = quick_xml::Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new(
                XML_VERSION,
                Some(XML_ENCODING),
                None,
            )))
            .map_err(SeError::custom)?;
        writer.get_mut().push(b'\n');
        let instruction = format!(
            "{STYLESHEET_TARGET} type=\"text/css\" href=\"{}\"",
            self.stylesheet_href
        );
        writer
            .write_event(Event::PI(BytesPI::new(instruction.as_str())))
            .map_err(SeError::custom)?;
        writer.get_mut().push(b'\n');
        String::from_utf8(writer.into_inner()).map_err(SeError::custom)
    }
}

fn supported_type<R: Record>(object: &R) -> Result<ConcreteType, PersistError> {
    object
        .concrete_type()
        .filter(|concrete| concrete.category().is_persistable())
        .ok_or(PersistError::UnsupportedObject {
            type_name: object.type_name(),
        })
}

/// Storage key of `object`: its name, or its type name when the name is empty.
#[must_use]
pub fn storage_key<R: Record>(object: &R) -> &str {
    let name = object.record_name();
    if name.is_empty() {
        object.type_name()
    } else {
        name
    }
}

/// Path `object` is written to inside `directory`.
///
/// Objects sharing a name share a path, whatever their type.
///
/// # Errors
///
/// Returns [`PersistError::InvalidStorageKey`] when the key would name a
/// file outside `directory`: it contains a path separator or a NUL byte,
/// or is `.` or `..`.
pub fn storage_path<R: Record>(directory: &Path, object: &R) -> Result<PathBuf, PersistError> {
    let key = storage_key(object);
    if matches!(key, "." | "..") || key.contains(['/', '\\', '\0']) {
        return Err(PersistError::InvalidStorageKey {
            key: key.to_string(),
        });
    }
    Ok(directory.join(format!("{key}.{DOCUMENT_EXTENSION}")))
}

/// Write `object` with the default stylesheet reference.
///
/// # Errors
///
/// See [`DocumentCodec::encode`].
pub fn encode<R: Record>(directory: &Path, object: &R) -> Result<PathBuf, PersistError> {
    DocumentCodec::default().encode(directory, object)
}

/// Determine the concrete type of a stored document from its root tag only.
///
/// # Errors
///
/// Returns [`PersistError::FileNotFound`], [`PersistError::NotXmlFormat`],
/// [`PersistError::MissingRootElement`], or [`PersistError::UnknownType`]
/// when the tag is not registered.
pub fn peek_type(path: &Path) -> Result<ConcreteType, PersistError> {
    let text = read_document(path)?;
    let tag = root_tag(path, &text)?.ok_or_else(|| PersistError::MissingRootElement {
        path: path.to_path_buf(),
    })?;
    log::debug!("{} has root <{tag}>", path.display());
    resolve_concrete_type(&tag)
}

/// Reconstruct a `T` from the document at `path`.
///
/// # Errors
///
/// Returns [`PersistError::FileNotFound`] or [`PersistError::NotXmlFormat`]
/// as [`peek_type`] does, and [`PersistError::NullResult`] when the document
/// is empty, holds a different type, or does not deserialize into `T`.
pub fn decode<T: Persist>(path: &Path) -> Result<T, PersistError> {
    let text = read_document(path)?;
    let null_result = |reason: String| PersistError::NullResult {
        path: path.to_path_buf(),
        reason,
    };

    let tag = root_tag(path, &text)?.ok_or_else(|| null_result("document is empty".into()))?;
    if tag != T::TYPE.tag() {
        return Err(null_result(format!(
            "expected root <{}>, found <{tag}>",
            T::TYPE.tag()
        )));
    }
    let text = protect_value_whitespace(&text).map_err(null_result)?;
    quick_xml::de::from_str(&text).map_err(|err| null_result(err.to_string()))
}

const fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn char_refs(whitespace: &str) -> String {
    whitespace
        .chars()
        .map(|c| format!("&#{};", u32::from(c)))
        .collect()
}

/// Rewrite the leading and trailing whitespace of every leaf value as
/// character references.
///
/// The deserializer trims raw whitespace around text; references survive the
/// trim and unescape back to the original characters. Indentation between
/// elements is left alone.
fn protect_value_whitespace(text: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(text);
    let mut events = Vec::new();
    loop {
        match reader.read_event().map_err(|err| err.to_string())? {
            Event::Eof => break,
            event => events.push(event),
        }
    }

    let mut writer = quick_xml::Writer::new(Vec::with_capacity(text.len()));
    for (index, event) in events.iter().enumerate() {
        let is_leaf_value = index > 0
            && matches!(events[index - 1], Event::Start(_))
            && matches!(events.get(index + 1), Some(Event::End(_)));
        let event = match event {
            Event::Text(raw) if is_leaf_value => {
                let raw = std::str::from_utf8(raw).map_err(|err| err.to_string())?;
                let body = raw.trim_matches(is_xml_space);
                let start = raw.len() - raw.trim_start_matches(is_xml_space).len();
                let escaped = format!(
                    "{}{body}{}",
                    char_refs(&raw[..start]),
                    char_refs(&raw[start + body.len()..])
                );
                Event::Text(BytesText::from_escaped(escaped))
            }
            other => other.clone(),
        };
        writer.write_event(event).map_err(|err| err.to_string())?;
    }
    String::from_utf8(writer.into_inner()).map_err(|err| err.to_string())
}

/// Reconstruct whatever object the document at `path` holds, dispatching on its root tag.
///
/// # Errors
///
/// Any error of [`peek_type`] or [`decode`].
pub fn decode_any(path: &Path) -> Result<DomainObject, PersistError> {
    let object = match peek_type(path)? {
        ConcreteType::Weapon => Item::Weapon(decode::<Weapon>(path)?).into(),
        ConcreteType::HeadPiece => Item::HeadPiece(decode::<HeadPiece>(path)?).into(),
        ConcreteType::TorsoPiece => Item::TorsoPiece(decode::<TorsoPiece>(path)?).into(),
        ConcreteType::Aid => Item::Aid(decode::<Aid>(path)?).into(),
        ConcreteType::Ammo => Item::Ammo(decode::<Ammo>(path)?).into(),
        ConcreteType::Misc => Item::Misc(decode::<Misc>(path)?).into(),
        ConcreteType::Player => Entity::Player(decode::<Player>(path)?).into(),
        ConcreteType::Human => Entity::Human(decode::<Human>(path)?).into(),
        ConcreteType::Robot => Entity::Robot(decode::<Robot>(path)?).into(),
        ConcreteType::Ghoul => Entity::Ghoul(decode::<Ghoul>(path)?).into(),
        ConcreteType::Feral => Entity::Feral(decode::<Feral>(path)?).into(),
        ConcreteType::SuperMutant => Entity::SuperMutant(decode::<SuperMutant>(path)?).into(),
        ConcreteType::Nightkin => Entity::Nightkin(decode::<Nightkin>(path)?).into(),
        ConcreteType::Dog => Entity::Dog(decode::<Dog>(path)?).into(),
        ConcreteType::NightStalker => Entity::NightStalker(decode::<NightStalker>(path)?).into(),
        ConcreteType::BloatFly => Entity::BloatFly(decode::<BloatFly>(path)?).into(),
        ConcreteType::DeathClaw => Entity::DeathClaw(decode::<DeathClaw>(path)?).into(),
        ConcreteType::Perk => DomainObject::Perk(decode::<Perk>(path)?),
        ConcreteType::Location => DomainObject::Location(decode::<Location>(path)?),
    };
    Ok(object)
}

/// Whether `path` carries the document extension.
#[must_use]
pub fn is_document_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == DOCUMENT_EXTENSION)
}

/// Every document in `directory`, sorted by file name. Other entries are skipped.
///
/// # Errors
///
/// Returns [`PersistError::DirectoryNotFound`] if `directory` does not exist,
/// or [`PersistError::Io`] if it cannot be listed.
pub fn document_paths(directory: &Path) -> Result<Vec<PathBuf>, PersistError> {
    if !directory.is_dir() {
        return Err(PersistError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }
    let entries = fs::read_dir(directory).map_err(|source| PersistError::io(directory, source))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| PersistError::io(directory, source))?
            .path();
        if path.is_file() && is_document_path(&path) {
            paths.push(path);
        } else {
            log::warn!("skipping {}: not a document", path.display());
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_document(path: &Path) -> Result<String, PersistError> {
    if !path.is_file() {
        return Err(PersistError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    if !is_document_path(path) {
        return Err(PersistError::NotXmlFormat {
            path: path.to_path_buf(),
            reason: format!("expected a '*.{DOCUMENT_EXTENSION}' file"),
        });
    }
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => PersistError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => PersistError::io(path, source),
    })?;
    String::from_utf8(bytes).map_err(|err| PersistError::NotXmlFormat {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

/// Local name of the first element, skipping the prolog. `Ok(None)` when there is none.
fn root_tag(path: &Path, text: &str) -> Result<Option<String>, PersistError> {
    let not_xml = |reason: String| PersistError::NotXmlFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                let local = element.local_name();
                let name = std::str::from_utf8(local.as_ref())
                    .map_err(|err| not_xml(err.to_string()))?;
                return Ok(Some(name.to_string()));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(Event::Text(text)) if !text.iter().all(u8::is_ascii_whitespace) => {
                return Err(not_xml("text outside of the root element".to_string()));
            }
            Ok(_) => {}
            Err(err) => return Err(not_xml(err.to_string())),
        }
    }
}
