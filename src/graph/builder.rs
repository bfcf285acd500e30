use crate::errors::{Result, ServicefileError};
use crate::graph::ir::{RelationshipDecl, ServiceDecl};
use crate::graph::servicefile::{Info, Relationship, ServiceFile};
use crate::tag::Declaration;
use std::collections::BTreeMap;

/// Accumulates declarations from every comment group of one scan and folds
/// them into one `ServiceFile` per service name.
///
/// A builder belongs to a single scan; `build` consumes it.
#[derive(Debug, Default)]
pub struct ServiceGraphBuilder {
    services: Vec<ServiceDecl>,
    relationships: Vec<RelationshipDecl>,
    default_service: Option<String>,
}

impl ServiceGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Owner used for implicit relationships instead of inferring one.
    pub fn with_default_service(mut self, name: Option<String>) -> Self {
        self.default_service = name.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn add_service(&mut self, service: ServiceDecl) {
        self.services.push(service);
    }

    pub fn add_relationship(&mut self, relationship: RelationshipDecl) {
        self.relationships.push(relationship);
    }

    pub fn add_declaration(&mut self, declaration: Declaration) {
        match declaration {
            Declaration::Service(s) => self.add_service(s),
            Declaration::Relationship(r) => self.add_relationship(r),
        }
    }

    /// Validate, resolve owners, and merge everything into service files
    /// ordered by service name.
    pub fn build(self) -> Result<Vec<ServiceFile>> {
        self.validate_no_mixed_usage()?;

        let mut service_files: BTreeMap<String, ServiceFile> = BTreeMap::new();

        for s in &self.services {
            if service_files.contains_key(&s.name) {
                tracing::warn!("Service '{}' is declared more than once; last one wins", s.name);
            }
            service_files.insert(
                s.name.clone(),
                ServiceFile::new(Info {
                    name: s.name.clone(),
                    description: s.description.clone(),
                    system: s.system.clone(),
                }),
            );
        }

        for r in &self.relationships {
            let service_name = self.determine_service_name(r, &service_files)?;

            let service_file = service_files
                .entry(service_name.clone())
                .or_insert_with(|| {
                    tracing::debug!("Relationship references undeclared service '{service_name}'");
                    ServiceFile::new(Info {
                        name: service_name.clone(),
                        ..Default::default()
                    })
                });

            service_file.relationships.push(Relationship {
                action: r.action.clone(),
                name: r.target.clone(),
                technology: r.technology.clone(),
                description: r.description.clone(),
                proto: r.proto.clone(),
            });
        }

        if service_files.is_empty() {
            return Err(ServicefileError::NoServicesFound);
        }

        Ok(service_files
            .into_values()
            .map(|mut sf| {
                sf.sort();
                sf
            })
            .collect())
    }

    fn validate_no_mixed_usage(&self) -> Result<()> {
        let has_explicit = self.relationships.iter().any(|r| r.addressing.is_explicit());
        let has_implicit = self.relationships.iter().any(|r| !r.addressing.is_explicit());

        if has_explicit && has_implicit {
            return Err(ServicefileError::MixedAddressingMode);
        }
        Ok(())
    }

    fn determine_service_name(
        &self,
        r: &RelationshipDecl,
        service_files: &BTreeMap<String, ServiceFile>,
    ) -> Result<String> {
        if let Some(owner) = r.addressing.owner() {
            return Ok(owner.to_string());
        }

        if let Some(ref default) = self.default_service {
            return Ok(default.clone());
        }

        let mut names = service_files.keys();
        match (names.next(), names.next()) {
            (Some(only), None) => Ok(only.clone()),
            (None, _) => Err(ServicefileError::NoServiceFound {
                relationship: r.to_string(),
            }),
            (Some(_), Some(_)) => Err(ServicefileError::AmbiguousImplicitOwner {
                relationship: r.to_string(),
                candidates: service_files
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}
