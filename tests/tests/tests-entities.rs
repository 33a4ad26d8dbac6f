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

use dataverse_gen_schema_model::model::OutputType;
use dataverse_gen_schema_model::FileMetadataService;
use dataverse_gen_schema_model::ModelError;
use dataverse_gen_schema_model::SchemaModel;
use dataverse_gen_tests::fixture;
use dataverse_gen_tests::fixtures_dir;
use dataverse_gen_tests::generate;
use dataverse_gen_tests::names;
use dataverse_gen_tests::options;
use dataverse_gen_tests::service;
use dataverse_gen_tests::Error;
use dataverse_gen_tests::Expect;
use dataverse_gen_tests::Service;
use dataverse_gen_tests::DATAVERSE_EDMX;
use std::error::Error as StdError;
use tokio::test;

#[test]
async fn account_with_two_attributes() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["account"], &[], &[]), &["account"]).await?;
    assert_eq!(names(model.entity_types(), |e| e.name.as_str()), vec!["account"]);

    let account = &model.entity_types()[0];
    assert_eq!(account.schema_name.as_deref(), Some("Account"));
    assert_eq!(account.entity_set_name.as_deref(), Some("accounts"));
    assert_eq!(account.key_name.as_deref(), Some("accountid"));
    assert_eq!(
        names(&account.properties, |p| p.name.as_str()),
        vec!["name", "accountid"]
    );
    let types = account
        .properties
        .iter()
        .map(|p| {
            p.type_descriptor
                .as_ref()
                .map(|d| (d.output_type, d.name.as_str()))
        })
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            Some((OutputType::Primitive, "string")),
            Some((OutputType::Primitive, "Guid")),
        ]
    );
    assert_eq!(account.properties[0].display_name, "Account Name");
    assert_eq!(account.properties[1].display_name, "Account");
    assert!(account.properties[0].is_required);
    assert!(!account.properties[1].is_required);

    assert!(model.complex_types().is_empty());
    assert!(model.enum_types().is_empty());
    assert!(model.actions().is_empty());
    assert!(model.functions().is_empty());
    Ok(())
}

#[test]
async fn polymorphic_lookup_collapses() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["task"], &[], &[]), &["task"]).await?;
    let task = model
        .graph()
        .entity_type("task")
        .ok_or_else(|| Error::ExpectedItem("entity", "task".into()))?;

    let regarding = task
        .navigation_properties
        .iter()
        .filter(|n| n.full_name.starts_with("regardingobjectid"))
        .collect::<Vec<_>>();
    assert_eq!(regarding.len(), 1);
    assert_eq!(regarding[0].name, "regardingobjectid");
    assert_eq!(regarding[0].ptype, "account,contact,lead");
    assert_eq!(
        regarding[0].referential_constraint.as_deref(),
        Some("_regardingobjectid_value")
    );
    assert!(task
        .navigation_properties
        .iter()
        .any(|n| n.name == "owninguser"));
    Ok(())
}

#[test]
async fn customer_lookup_collapses() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["contact"], &[], &[]), &["contact"]).await?;
    let contact = &model.entity_types()[0];
    assert_eq!(contact.navigation_properties.len(), 1);
    assert_eq!(contact.navigation_properties[0].name, "parentcustomerid");
    assert_eq!(contact.navigation_properties[0].ptype, "account,contact");

    let parent = contact
        .properties
        .iter()
        .find(|p| p.name == "parentcustomerid")
        .and_then(|p| p.type_descriptor.as_ref())
        .ok_or_else(|| Error::ExpectedItem("property", "parentcustomerid".into()))?;
    assert_eq!(parent.name, "EntityReference");
    assert_eq!(parent.import_location.as_deref(), Some("dataverse-ify"));
    Ok(())
}

#[test]
async fn global_option_set_is_shared() -> Result<(), Box<dyn StdError>> {
    let model = generate(
        DATAVERSE_EDMX,
        options(&["contact", "task"], &[], &[]),
        &["contact", "task"],
    )
    .await?;
    let priority = model
        .enum_types()
        .iter()
        .filter(|e| e.name == "dev1_priority")
        .collect::<Vec<_>>();
    assert_eq!(priority.len(), 1);
    assert_eq!(priority[0].referenced_by, vec!["contact", "task"]);
    assert_eq!(
        names(&priority[0].members, |m| m.name.as_str()),
        vec!["Low", "Normal", "High"]
    );

    for entity in model.entity_types() {
        let property = entity
            .properties
            .iter()
            .find(|p| p.name == "dev1_priority")
            .ok_or_else(|| Error::ExpectedItem("property", "dev1_priority".into()))?;
        assert!(property.is_enum);
        assert_eq!(property.ptype, "dev1_priority");
        let descriptor = property
            .type_descriptor
            .as_ref()
            .ok_or_else(|| Error::ExpectedItem("descriptor", "dev1_priority".into()))?;
        assert_eq!(descriptor.output_type, OutputType::Enum);
        assert_eq!(
            descriptor.import_location.as_deref(),
            Some("../enums/dev1_priority")
        );
    }
    Ok(())
}

#[test]
async fn local_option_set_members_are_code_safe() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["task"], &[], &[]), &["task"]).await?;
    let progress = model
        .graph()
        .enum_type("task_dev1_progress")
        .ok_or_else(|| Error::ExpectedItem("enum", "task_dev1_progress".into()))?;
    let members = progress
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.value.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        members,
        vec![("_7", "7"), ("NotStarted", "10"), ("_50Complete", "50")]
    );
    assert_eq!(progress.referenced_by, vec!["task"]);
    Ok(())
}

#[test]
async fn entity_properties_sorted_descending() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["task"], &[], &[]), &["task"]).await?;
    assert_eq!(
        names(&model.entity_types()[0].properties, |p| p.name.as_str()),
        vec![
            "subject",
            "regardingobjectid",
            "dev1_progress",
            "dev1_priority",
            "activityid"
        ]
    );
    Ok(())
}

#[test]
async fn date_format_carries_behavior() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&["contact"], &[], &[]), &["contact"]).await?;
    let birthdate = model.entity_types()[0]
        .properties
        .iter()
        .find(|p| p.name == "birthdate")
        .ok_or_else(|| Error::ExpectedItem("property", "birthdate".into()))?;
    assert_eq!(birthdate.format, "DateOnly:DateOnly");
    assert_eq!(birthdate.display_name, "Birthday");
    assert_eq!(
        birthdate.type_descriptor.as_ref().map(|d| d.name.as_str()),
        Some("Date")
    );
    Ok(())
}

#[test]
async fn unknown_entity_stops_generation() -> Result<(), Box<dyn StdError>> {
    let service = Service::new();
    service
        .expect(Expect::edmx(fixture(DATAVERSE_EDMX)?))
        .expect(Expect::entity_not_found("account"));
    let mut model = SchemaModel::new(service, options(&["account"], &[], &[]));
    let err = model.generate().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "entity account: account is not a Dataverse entity, remove it from the .dataverse-gen.json"
    );
    assert!(matches!(model.generate().await, Err(ModelError::AlreadyGenerated)));
    Ok(())
}

#[test]
async fn entities_are_enriched_in_name_order() -> Result<(), Box<dyn StdError>> {
    let service = service(DATAVERSE_EDMX, &["contact", "task"])?;
    let mut model = SchemaModel::new(service, options(&["task", "contact"], &[], &[]));
    model.generate().await?;
    assert_eq!(
        names(model.entity_types(), |e| e.name.as_str()),
        vec!["contact", "task"]
    );
    Ok(())
}

#[test]
async fn file_service_builds_the_same_model() -> Result<(), Box<dyn StdError>> {
    let dir = fixtures_dir();
    let service = FileMetadataService::new(dir.join(DATAVERSE_EDMX), dir.join("metadata"));
    let mut from_files = SchemaModel::new(service, options(&["task"], &[], &[]));
    from_files.generate().await?;
    let mocked = generate(DATAVERSE_EDMX, options(&["task"], &[], &[]), &["task"]).await?;
    assert_eq!(from_files.graph(), mocked.graph());
    Ok(())
}
