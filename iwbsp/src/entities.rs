use glam::DVec3;

use crate::error::FormatError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ParseDepth {
    Root,
    Entity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    pub pairs: Vec<(String, String)>,
}

impl Entity {
    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    /// `"origin" "x y z"`, zero when missing or malformed.
    pub fn origin(&self) -> DVec3 {
        let Some(origin) = self.get("origin") else {
            return DVec3::ZERO;
        };
        let xyz: Vec<f64> = origin
            .split_whitespace()
            .filter_map(|c| c.parse().ok())
            .collect();
        match xyz[..] {
            [x, y, z] => DVec3::new(x, y, z),
            _ => {
                log::warn!("Ignoring malformed origin {:?}", origin);
                DVec3::ZERO
            }
        }
    }

    /// Index of the inline model this entity owns, from `"model" "*N"`.
    pub fn brush_model(&self) -> Option<usize> {
        self.get("model")?.strip_prefix('*')?.parse().ok()
    }
}

/// Parses the entity lump: `{` / `}` delimited records of `"key" "value"` lines.
///
/// Parsing stops at the first NUL byte.
pub fn parse_entities(data: &[u8]) -> Result<Vec<Entity>, FormatError> {
    let end = data.iter().position(|&c| c == 0).unwrap_or(data.len());
    let text = String::from_utf8_lossy(&data[..end]);

    let mut depth = ParseDepth::Root;
    let mut entities: Vec<Entity> = Vec::new();

    for (i, line) in text.split('\n').enumerate() {
        let line = line.trim_end_matches('\r').trim_start_matches(' ');
        let line_no = i + 1;

        match line.chars().next() {
            Some('{') => {
                if depth != ParseDepth::Root {
                    return Err(FormatError::UnbalancedBrace {
                        brace: '{',
                        line: line_no,
                    });
                }
                depth = ParseDepth::Entity;
                entities.push(Entity::default());
            }
            Some('}') => {
                if depth == ParseDepth::Root {
                    return Err(FormatError::UnbalancedBrace {
                        brace: '}',
                        line: line_no,
                    });
                }
                depth = ParseDepth::Root;
            }
            Some('(') => return Err(FormatError::BrushInEntities { line: line_no }),
            Some('"') if depth == ParseDepth::Entity => match parse_key_value(line) {
                Some(pair) => {
                    if let Some(entity) = entities.last_mut() {
                        entity.pairs.push(pair);
                    }
                }
                None => log::warn!("Skipping malformed entity line {}: {:?}", line_no, line),
            },
            _ => (),
        }
    }

    if depth != ParseDepth::Root {
        return Err(FormatError::UnbalancedBrace {
            brace: '{',
            line: text.split('\n').count(),
        });
    }
    log::debug!("Parsed {} entities", entities.len());
    Ok(entities)
}

// "key" "value"
fn parse_key_value(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix('"')?;
    let (key, rest) = rest.split_once('"')?;
    if key.is_empty() {
        return None;
    }
    let (value, _) = rest.trim_start().strip_prefix('"')?.split_once('"')?;
    Some((key.to_owned(), value.to_owned()))
}
