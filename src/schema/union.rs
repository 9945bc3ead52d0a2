use indexmap::IndexMap;
use indexmap::map::Entry;

use super::Schema;
use crate::error::{SchemaError, SchemaResult};

/// Member of an unnamed union: a schema, or the marker meaning "absence is
/// acceptable here".
#[derive(Debug, Clone)]
pub enum Member {
    Schema(Schema),
    Undefined,
}

#[derive(Debug, Clone)]
enum Members {
    Named(IndexMap<String, Schema>),
    Unnamed {
        schemas: Vec<Schema>,
        undefined: bool,
    },
}

/// A value is accepted if it matches any member. Members are tried in
/// declaration order; there is no discriminant inspection.
#[derive(Debug, Clone)]
pub struct UnionSchema {
    members: Members,
}

fn memberizable(schema: &Schema) -> SchemaResult<()> {
    if schema.is_union() {
        return Err(SchemaError::NestedUnion {
            context: "union member schema",
        });
    }
    Ok(())
}

impl UnionSchema {
    pub fn named<K: Into<String>>(
        members: impl IntoIterator<Item = (K, Schema)>,
    ) -> SchemaResult<Self> {
        let mut map = IndexMap::new();
        for (name, schema) in members {
            memberizable(&schema)?;
            match map.entry(name.into()) {
                Entry::Occupied(o) => {
                    return Err(SchemaError::DuplicateMember {
                        name: o.key().clone(),
                    });
                }
                Entry::Vacant(v) => {
                    v.insert(schema);
                }
            }
        }
        if map.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Self {
            members: Members::Named(map),
        })
    }

    pub fn unnamed(members: impl IntoIterator<Item = Member>) -> SchemaResult<Self> {
        let mut schemas = Vec::new();
        let mut undefined = false;
        for member in members {
            match member {
                Member::Schema(schema) => {
                    memberizable(&schema)?;
                    schemas.push(schema);
                }
                Member::Undefined if undefined => return Err(SchemaError::RepeatedUndefined),
                Member::Undefined => undefined = true,
            }
        }
        if schemas.is_empty() {
            return Err(SchemaError::EmptyUnion);
        }
        Ok(Self {
            members: Members::Unnamed { schemas, undefined },
        })
    }

    /// The `{inner, Undefined}` special case.
    pub fn optional(inner: Schema) -> SchemaResult<Self> {
        if inner.is_union() {
            return Err(SchemaError::NestedUnion {
                context: "optional value schema",
            });
        }
        Self::unnamed([Member::Schema(inner), Member::Undefined])
    }

    pub fn is_named(&self) -> bool {
        matches!(self.members, Members::Named(_))
    }

    pub fn admits_undefined(&self) -> bool {
        matches!(self.members, Members::Unnamed { undefined: true, .. })
    }

    /// The wrapped schema when this union is exactly `{X, Undefined}`.
    pub fn optional_value(&self) -> Option<&Schema> {
        match &self.members {
            Members::Unnamed { schemas, undefined: true } if schemas.len() == 1 => schemas.first(),
            _ => None,
        }
    }

    /// Member schemas in declaration order, without the undefined marker.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> + '_ {
        let (named, unnamed) = match &self.members {
            Members::Named(map) => (Some(map.values()), None),
            Members::Unnamed { schemas, .. } => (None, Some(schemas.iter())),
        };
        named.into_iter().flatten().chain(unnamed.into_iter().flatten())
    }

    /// Member names, for named unions only.
    pub fn names(&self) -> Option<impl Iterator<Item = &str> + '_> {
        match &self.members {
            Members::Named(map) => Some(map.keys().map(String::as_str)),
            Members::Unnamed { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.members {
            Members::Named(map) => map.len(),
            Members::Unnamed { schemas, undefined } => schemas.len() + usize::from(*undefined),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_is_unnamed_pair_with_undefined() {
        let u = UnionSchema::optional(Schema::boolean()).unwrap();
        assert!(!u.is_named());
        assert!(u.admits_undefined());
        assert_eq!(u.len(), 2);
        assert!(matches!(u.optional_value(), Some(Schema::Boolean)));
    }

    #[test]
    fn optional_of_optional_is_rejected() {
        let once = Schema::optional(Schema::boolean()).unwrap();
        assert!(matches!(UnionSchema::optional(once), Err(SchemaError::NestedUnion { .. })));
    }

    #[test]
    fn named_union_keeps_member_order_and_rejects_duplicates() {
        let u = UnionSchema::named([("flag", Schema::boolean()), ("other", Schema::boolean())])
            .unwrap();
        assert!(u.is_named());
        assert!(!u.admits_undefined());
        assert!(u.optional_value().is_none());
        let names: Vec<&str> = u.names().unwrap().collect();
        assert_eq!(names, ["flag", "other"]);
        assert_eq!(u.schemas().count(), 2);

        let err =
            UnionSchema::named([("x", Schema::boolean()), ("x", Schema::boolean())]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateMember { name: "x".into() });
    }

    #[test]
    fn empty_and_degenerate_unions_are_rejected() {
        let none: Vec<(String, Schema)> = Vec::new();
        assert_eq!(UnionSchema::named(none).unwrap_err(), SchemaError::EmptyUnion);
        assert_eq!(
            UnionSchema::unnamed([Member::Undefined]).unwrap_err(),
            SchemaError::EmptyUnion
        );
        assert_eq!(
            UnionSchema::unnamed([
                Member::Schema(Schema::boolean()),
                Member::Undefined,
                Member::Undefined,
            ])
            .unwrap_err(),
            SchemaError::RepeatedUndefined
        );
    }

    #[test]
    fn union_members_cannot_be_unions() {
        let opt = Schema::optional(Schema::boolean()).unwrap();
        assert!(UnionSchema::named([("maybe", opt.clone())]).is_err());
        assert!(UnionSchema::unnamed([Member::Schema(opt)]).is_err());
    }
}
