// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Schema model orchestrator.
//!
//! [`SchemaModel`] owns the graph under construction and drives the
//! pipeline: EDMX parse, reference filtering, metadata enrichment,
//! complex type renames and type mapping.

use crate::config::DataverseGenOptions;
use crate::context::SchemaBuildContext;
use crate::enricher::enrich;
use crate::error::ModelError;
use crate::filter::filter;
use crate::model::ComplexType;
use crate::model::EntitySet;
use crate::model::EntityType;
use crate::model::EnumType;
use crate::model::Operation;
use crate::model::SchemaGraph;
use crate::parser;
use crate::type_mapper::TypeIndex;
use crate::type_mapper::TypeMapper;
use dataverse_gen_core::EntityLogicalName;
use dataverse_gen_core::MetadataService;
use log::debug;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unloaded,
    EdmxLoaded,
    Generated,
}

/// Schema model built from the EDMX document and the metadata API.
///
/// The model is single use: once [`SchemaModel::generate`] has been
/// called, successfully or not, the graph must not be generated again.
/// Build a new model to retry.
pub struct SchemaModel<S: MetadataService> {
    options: DataverseGenOptions,
    service: S,
    context: SchemaBuildContext,
    graph: SchemaGraph,
    state: State,
}

impl<S> SchemaModel<S>
where
    S: MetadataService,
    S::Error: 'static,
{
    #[must_use]
    pub fn new(service: S, options: DataverseGenOptions) -> Self {
        Self {
            options,
            service,
            context: SchemaBuildContext::new(),
            graph: SchemaGraph::default(),
            state: State::Unloaded,
        }
    }

    /// Fetch and parse the EDMX document. Does nothing if the document
    /// is already loaded.
    ///
    /// # Errors
    ///
    /// - `ModelError::Service` if the document cannot be fetched
    /// - `ModelError::Edmx` if the document is malformed
    pub async fn load_edmx_metadata(&mut self) -> Result<(), ModelError> {
        if self.state != State::Unloaded {
            return Ok(());
        }
        let edmx = self
            .service
            .get_edmx_metadata(self.options.output.use_cache)
            .await
            .map_err(ModelError::service)?;
        self.graph = parser::parse(&edmx)?;
        self.state = State::EdmxLoaded;
        Ok(())
    }

    /// Build the final graph.
    ///
    /// # Errors
    ///
    /// - `ModelError::AlreadyGenerated` on the second call
    /// - `ModelError::Service` or `ModelError::Edmx` if loading fails
    /// - `ModelError::Entity` if metadata of an entity cannot be
    ///   retrieved or the entity does not exist
    pub async fn generate(&mut self) -> Result<(), ModelError> {
        if self.state == State::Generated {
            return Err(ModelError::AlreadyGenerated);
        }
        self.load_edmx_metadata().await?;
        self.state = State::Generated;

        filter(&mut self.graph, &self.options);
        self.add_entity_metadata().await?;
        self.rename_complex_types();
        TypeMapper::new(TypeIndex::build(&self.graph), &self.options).apply(&mut self.graph);
        info!(
            "schema model: {} entities, {} complex types, {} enums, {} actions, {} functions",
            self.graph.entity_types.len(),
            self.graph.complex_types.len(),
            self.graph.enum_types.len(),
            self.graph.actions.len(),
            self.graph.functions.len()
        );
        Ok(())
    }

    async fn add_entity_metadata(&mut self) -> Result<(), ModelError> {
        let names = self
            .graph
            .entity_types
            .iter()
            .map(|e| e.name.clone())
            .collect::<Vec<_>>();
        for name in names {
            let logical_name = EntityLogicalName::from(name.as_str());
            let response = self
                .service
                .get_entity_metadata(&logical_name)
                .await
                .map_err(|err| ModelError::Entity(name.clone(), Box::new(ModelError::service(err))))?;
            let record = response.entity_metadata.into_iter().next().ok_or_else(|| {
                ModelError::Entity(
                    name.clone(),
                    Box::new(ModelError::NotADataverseEntity(name.clone())),
                )
            })?;
            let Some(record_name) = record.logical_name.as_deref() else {
                debug!("{name}: metadata record without logical name, skipped");
                continue;
            };
            let graph = &mut self.graph;
            match graph.entity_types.iter_mut().find(|e| e.name == record_name) {
                Some(entity) => enrich(entity, &record, &mut self.context, &mut graph.enum_types),
                None => debug!("{name}: metadata record {record_name} has no entity type"),
            }
        }
        Ok(())
    }

    fn rename_complex_types(&mut self) {
        for complex_type in &mut self.graph.complex_types {
            let mapped = self.options.mapped_name(&complex_type.name);
            if mapped != complex_type.name {
                debug!("complex type {} renamed to {mapped}", complex_type.name);
                complex_type.name = mapped.to_string();
            }
        }
    }

    #[must_use]
    pub const fn options(&self) -> &DataverseGenOptions {
        &self.options
    }

    /// Option sets interned so far.
    #[must_use]
    pub const fn context(&self) -> &SchemaBuildContext {
        &self.context
    }

    #[must_use]
    pub const fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> SchemaGraph {
        self.graph
    }

    #[must_use]
    pub fn entity_types(&self) -> &[EntityType] {
        &self.graph.entity_types
    }

    #[must_use]
    pub fn entity_sets(&self) -> &[EntitySet] {
        &self.graph.entity_sets
    }

    #[must_use]
    pub fn complex_types(&self) -> &[ComplexType] {
        &self.graph.complex_types
    }

    #[must_use]
    pub fn enum_types(&self) -> &[EnumType] {
        &self.graph.enum_types
    }

    #[must_use]
    pub fn actions(&self) -> &[Operation] {
        &self.graph.actions
    }

    #[must_use]
    pub fn functions(&self) -> &[Operation] {
        &self.graph.functions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OutputType;
    use dataverse_gen_service_mock::Expect;
    use dataverse_gen_service_mock::MetadataService as MockService;
    use std::io::Error as IoError;
    use std::io::ErrorKind;

    const DOC: &str = r#"<edmx:Edmx Version="4.0" xmlns:edmx="http://docs.oasis-open.org/odata/ns/edmx">
  <edmx:DataServices>
    <Schema Namespace="Microsoft.Dynamics.CRM" Alias="mscrm" xmlns="http://docs.oasis-open.org/odata/ns/edm">
      <EntityType Name="crmbaseentity" Abstract="true"/>
      <EntityType Name="account" BaseType="mscrm.crmbaseentity">
        <Key><PropertyRef Name="accountid"/></Key>
        <Property Name="name" Type="Edm.String"/>
        <Property Name="accountid" Type="Edm.Guid"/>
      </EntityType>
      <ComplexType Name="Object"/>
      <Action Name="Echo">
        <Parameter Name="Value" Type="mscrm.Object"/>
        <ReturnType Type="mscrm.Object"/>
      </Action>
      <EntityContainer Name="System">
        <EntitySet Name="accounts" EntityType="Microsoft.Dynamics.CRM.account"/>
      </EntityContainer>
    </Schema>
  </edmx:DataServices>
</edmx:Edmx>"#;

    const ACCOUNT: &str = r#"{"EntityMetadata": [{
        "LogicalName": "account",
        "SchemaName": "Account",
        "EntitySetName": "accounts",
        "Attributes": [
            {"LogicalName": "accountid", "SchemaName": "AccountId",
             "AttributeTypeName": {"Value": "UniqueidentifierType"}},
            {"LogicalName": "name", "SchemaName": "Name",
             "AttributeTypeName": {"Value": "StringType"}},
            {"LogicalName": "industrycode", "SchemaName": "IndustryCode",
             "AttributeTypeName": {"Value": "PicklistType"},
             "OptionSet": {"Name": "account_industrycode", "IsGlobal": false,
                "Options": [{"Value": 2, "Label": {"UserLocalizedLabel": {"Label": "Consulting"}}},
                            {"Value": 1, "Label": {"UserLocalizedLabel": {"Label": "Accounting"}}}]}},
            {"LogicalName": "fullname_virtual",
             "AttributeTypeName": {"Value": "VirtualType"}}
        ]
    }]}"#;

    type Service = MockService<IoError>;

    fn options(entities: &[&str], actions: &[&str]) -> DataverseGenOptions {
        DataverseGenOptions {
            entities: entities.iter().map(ToString::to_string).collect(),
            actions: actions.iter().map(ToString::to_string).collect(),
            ..DataverseGenOptions::default()
        }
    }

    #[tokio::test]
    async fn load_is_idempotent() {
        let service = Service::new();
        service.expect(Expect::edmx(DOC));
        let mut model = SchemaModel::new(service, DataverseGenOptions::default());
        model.load_edmx_metadata().await.unwrap();
        model.load_edmx_metadata().await.unwrap();
        assert_eq!(model.entity_types().len(), 1);
        assert_eq!(model.entity_sets().len(), 1);
        assert_eq!(model.entity_types()[0].entity_set_name.as_deref(), Some("accounts"));
    }

    #[tokio::test]
    async fn generate_enriches_requested_entity() {
        let service = Service::new();
        service
            .expect(Expect::edmx(DOC))
            .expect(Expect::entity("account", ACCOUNT));
        let mut model = SchemaModel::new(service, options(&["account"], &[]));
        model.generate().await.unwrap();

        let account = &model.entity_types()[0];
        assert_eq!(account.schema_name.as_deref(), Some("Account"));
        let names = account
            .properties
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["name", "industrycode", "accountid"]);

        let industry = &account.properties[1];
        assert!(industry.is_enum);
        let descriptor = industry.type_descriptor.as_ref().unwrap();
        assert_eq!(descriptor.output_type, OutputType::Enum);
        assert_eq!(descriptor.name, "account_account_industrycode");

        let enums = model.enum_types();
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].members[0].name, "Accounting");
        assert!(model.actions().is_empty());
        assert!(model.complex_types().is_empty());
    }

    #[tokio::test]
    async fn generate_renames_complex_types() {
        let service = Service::new();
        service.expect(Expect::edmx(DOC));
        let mut model = SchemaModel::new(service, options(&[], &["Echo"]));
        model.generate().await.unwrap();

        assert_eq!(model.complex_types().len(), 1);
        assert_eq!(model.complex_types()[0].name, "ObjectValue");
        let echo = &model.actions()[0];
        assert_eq!(echo.return_type.as_deref(), Some("mscrm.Object"));
        assert_eq!(echo.parameters[0].type_descriptors[0].name, "ObjectValue");
        assert_eq!(
            echo.parameters[0].type_descriptors[0].output_type,
            OutputType::Complex
        );
    }

    #[tokio::test]
    async fn unknown_entity_is_an_error() {
        let service = Service::new();
        service
            .expect(Expect::edmx(DOC))
            .expect(Expect::entity_not_found("account"));
        let mut model = SchemaModel::new(service, options(&["account"], &[]));
        let err = model.generate().await.unwrap_err();
        assert!(matches!(
            &err,
            ModelError::Entity(name, inner)
                if name == "account" && matches!(**inner, ModelError::NotADataverseEntity(_))
        ));
    }

    #[tokio::test]
    async fn service_error_is_propagated() {
        let service = Service::new();
        service.expect(Expect::edmx(DOC)).expect(Expect::entity_error(
            "account",
            IoError::new(ErrorKind::ConnectionRefused, "refused"),
        ));
        let mut model = SchemaModel::new(service, options(&["account"], &[]));
        let err = model.generate().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "entity account: metadata service error: response: refused"
        );
    }

    #[tokio::test]
    async fn generate_is_single_use() {
        let service = Service::new();
        service.expect(Expect::edmx(DOC));
        let mut model = SchemaModel::new(service, DataverseGenOptions::default());
        model.generate().await.unwrap();
        assert!(matches!(
            model.generate().await,
            Err(ModelError::AlreadyGenerated)
        ));
    }

    #[tokio::test]
    async fn edmx_error_is_propagated() {
        let service = Service::new();
        service.expect(Expect::edmx("<edmx:Edmx/>"));
        let mut model = SchemaModel::new(service, DataverseGenOptions::default());
        assert!(matches!(
            model.load_edmx_metadata().await,
            Err(ModelError::Edmx(_))
        ));
    }
}
