use std::str::FromStr;

use crate::domain::{
    entities::descriptor::{
        Capabilities, FeatureDescriptor, OneOrMany, RawDescriptor, Requirements,
    },
    error::DomainError,
    value_objects::{Capability, WILDCARD},
};

/// Centralized descriptor validation.
///
/// Both aggregate checks report everything at once: every missing field in
/// one error, every invalid capability value in another. Missing fields are
/// checked first, then the feature name, then capabilities.
pub struct DescriptorValidator;

impl DescriptorValidator {
    pub fn validate(raw: RawDescriptor) -> Result<FeatureDescriptor, DomainError> {
        Self::check_required(&raw)?;
        let name = raw.declared_name().unwrap_or_default().to_owned();
        Self::check_name(&name)?;

        let mut invalid = Vec::new();
        let capabilities = Capabilities {
            orm: parse_capability(raw.capabilities.orm.as_ref(), "capabilities.orm", &mut invalid),
            framework: parse_capability(
                raw.capabilities.framework.as_ref(),
                "capabilities.framework",
                &mut invalid,
            ),
        };
        let requires = Requirements {
            orm: parse_single(raw.requires.orm.as_deref(), "requires.orm", &mut invalid),
            framework: parse_single(
                raw.requires.framework.as_deref(),
                "requires.framework",
                &mut invalid,
            ),
        };
        if !invalid.is_empty() {
            return Err(DomainError::InvalidCapabilities { invalid });
        }

        Ok(FeatureDescriptor {
            name,
            kind: raw.kind.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            dependencies: raw.dependencies,
            dev_dependencies: raw.dev_dependencies,
            registry_dependencies: raw.registry_dependencies,
            capabilities,
            requires,
            target_mappings: raw.target_mappings,
        })
    }

    /// Report every required field that is absent or blank.
    pub fn check_required(raw: &RawDescriptor) -> Result<(), DomainError> {
        let required: [(&'static str, &Option<String>); 4] = [
            ("name", &raw.name),
            ("type", &raw.kind),
            ("title", &raw.title),
            ("description", &raw.description),
        ];

        let fields: Vec<&'static str> = required
            .into_iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(field, _)| field)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(DomainError::MissingRequiredFields { fields })
        }
    }

    /// The name becomes `{name}.json` under the output directory, so it must
    /// stay a single, non-hidden path segment.
    pub fn check_name(name: &str) -> Result<(), DomainError> {
        let reason = if name.contains('/') || name.contains('\\') {
            Some("must not contain path separators")
        } else if name.contains("..") {
            Some("must not contain '..'")
        } else if name.starts_with('.') {
            Some("must not start with '.'")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DomainError::InvalidFeatureName {
                name: name.to_owned(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

fn parse_capability<T>(
    declared: Option<&OneOrMany>,
    field: &str,
    invalid: &mut Vec<String>,
) -> Option<Capability<T>>
where
    T: FromStr + PartialEq,
{
    let values = declared?.values();
    let mut parsed = Vec::with_capacity(values.len());
    let mut wildcard = false;

    for value in values {
        if value == WILDCARD {
            wildcard = true;
            continue;
        }
        match value.parse::<T>() {
            Ok(v) if !parsed.contains(&v) => parsed.push(v),
            Ok(_) => {}
            Err(_) => invalid.push(format!("{field}: \"{value}\"")),
        }
    }

    Some(if wildcard {
        Capability::Any
    } else {
        Capability::Only(parsed)
    })
}

fn parse_single<T: FromStr>(
    declared: Option<&str>,
    field: &str,
    invalid: &mut Vec<String>,
) -> Option<T> {
    let value = declared?;
    if value == WILDCARD {
        return None;
    }
    match value.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            invalid.push(format!("{field}: \"{value}\""));
            None
        }
    }
}
