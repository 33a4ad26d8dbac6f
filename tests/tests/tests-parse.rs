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

use dataverse_gen_schema_model::parser::parse;
use dataverse_gen_schema_model::DataverseGenOptions;
use dataverse_gen_schema_model::ModelError;
use dataverse_gen_schema_model::SchemaModel;
use dataverse_gen_tests::fixture;
use dataverse_gen_tests::generate;
use dataverse_gen_tests::names;
use dataverse_gen_tests::options;
use dataverse_gen_tests::service;
use dataverse_gen_tests::DATAVERSE_EDMX;
use dataverse_gen_tests::SINGLE_EDMX;
use std::error::Error as StdError;
use tokio::test;

#[test]
async fn parse_is_deterministic() -> Result<(), Box<dyn StdError>> {
    let edmx = fixture(DATAVERSE_EDMX)?;
    assert_eq!(parse(&edmx)?, parse(&edmx)?);
    Ok(())
}

#[test]
async fn system_entities_are_removed() -> Result<(), Box<dyn StdError>> {
    let graph = parse(&fixture(DATAVERSE_EDMX)?)?;
    assert_eq!(
        names(&graph.entity_types, |e| e.name.as_str()),
        vec!["account", "contact", "task"]
    );
    // Entity sets of system entities are still listed.
    assert_eq!(
        names(&graph.entity_sets, |s| s.name.as_str()),
        vec!["accounts", "contacts", "principals", "tasks"]
    );
    Ok(())
}

#[test]
async fn collections_are_sorted() -> Result<(), Box<dyn StdError>> {
    let graph = parse(&fixture(DATAVERSE_EDMX)?)?;
    assert_eq!(
        names(&graph.complex_types, |c| c.name.as_str()),
        vec![
            "Object",
            "RetrievePrincipalAccessResponse",
            "Unused",
            "WhoAmIResponse",
            "dev1_QuoteLine",
            "dev1_QuoteRequest"
        ]
    );
    assert_eq!(
        names(&graph.actions, |a| a.name.as_str()),
        vec!["WinOpportunity", "dev1_CalculateQuote", "dev1_Escalate"]
    );
    assert_eq!(
        names(&graph.functions, |f| f.name.as_str()),
        vec!["RetrievePrincipalAccess", "WhoAmI"]
    );
    // Enums keep document order.
    assert_eq!(
        names(&graph.enum_types, |e| e.name.as_str()),
        vec!["AccessRights", "dev1_LineStatus"]
    );

    let account = graph.entity_type("account").ok_or("account")?;
    assert_eq!(
        names(&account.properties, |p| p.name.as_str()),
        vec!["accountid", "name"]
    );
    assert_eq!(
        names(&account.navigation_properties, |n| n.name.as_str()),
        vec!["Account_Tasks", "primarycontactid"]
    );
    Ok(())
}

#[test]
async fn entity_set_names_are_assigned() -> Result<(), Box<dyn StdError>> {
    let graph = parse(&fixture(DATAVERSE_EDMX)?)?;
    let set_names = graph
        .entity_types
        .iter()
        .map(|e| e.entity_set_name.as_deref())
        .collect::<Vec<_>>();
    assert_eq!(
        set_names,
        vec![Some("accounts"), Some("contacts"), Some("tasks")]
    );
    Ok(())
}

#[test]
async fn navigation_properties_keep_constraints() -> Result<(), Box<dyn StdError>> {
    let graph = parse(&fixture(DATAVERSE_EDMX)?)?;
    let account = graph.entity_type("account").ok_or("account")?;
    let tasks = &account.navigation_properties[0];
    assert!(tasks.is_collection);
    assert_eq!(tasks.ptype, "mscrm.task");
    assert_eq!(tasks.logical_name, "task");
    assert_eq!(tasks.referential_constraint, None);

    let primary_contact = &account.navigation_properties[1];
    assert!(!primary_contact.is_collection);
    assert_eq!(
        primary_contact.referential_constraint.as_deref(),
        Some("_primarycontactid_value")
    );
    assert_eq!(
        primary_contact.referenced_property.as_deref(),
        Some("contactid")
    );
    Ok(())
}

#[test]
async fn single_elements_become_lists() -> Result<(), Box<dyn StdError>> {
    let graph = parse(&fixture(SINGLE_EDMX)?)?;
    assert_eq!(graph.entity_types.len(), 1);
    let queue = &graph.entity_types[0];
    assert_eq!(queue.properties.len(), 1);
    assert_eq!(queue.navigation_properties.len(), 1);
    assert!(queue.navigation_properties[0].is_collection);
    // No entity container, no entity sets.
    assert!(graph.entity_sets.is_empty());
    assert_eq!(queue.entity_set_name, None);

    assert_eq!(graph.enum_types.len(), 1);
    assert_eq!(graph.enum_types[0].members.len(), 1);
    assert_eq!(graph.complex_types.len(), 1);
    assert_eq!(graph.complex_types[0].properties.len(), 1);
    assert_eq!(graph.actions.len(), 1);
    assert_eq!(graph.actions[0].parameters.len(), 1);
    assert!(graph.functions.is_empty());
    Ok(())
}

#[test]
async fn empty_allow_lists_produce_empty_model() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, DataverseGenOptions::default(), &[]).await?;
    assert!(model.entity_types().is_empty());
    assert!(model.actions().is_empty());
    assert!(model.functions().is_empty());
    assert!(model.complex_types().is_empty());
    assert!(model.enum_types().is_empty());
    // Entity sets are not filtered.
    assert_eq!(model.entity_sets().len(), 4);
    Ok(())
}

#[test]
async fn generate_runs_once() -> Result<(), Box<dyn StdError>> {
    let mut model = SchemaModel::new(
        service(DATAVERSE_EDMX, &["account"])?,
        options(&["account"], &[], &[]),
    );
    model.generate().await?;
    let before = model.graph().clone();
    assert!(matches!(
        model.generate().await,
        Err(ModelError::AlreadyGenerated)
    ));
    assert_eq!(model.graph(), &before);
    Ok(())
}

#[test]
async fn load_before_generate() -> Result<(), Box<dyn StdError>> {
    let mut model = SchemaModel::new(
        service(DATAVERSE_EDMX, &[])?,
        DataverseGenOptions::default(),
    );
    model.load_edmx_metadata().await?;
    assert_eq!(model.entity_types().len(), 3);
    assert_eq!(model.actions().len(), 3);
    model.load_edmx_metadata().await?;
    model.generate().await?;
    assert!(model.entity_types().is_empty());
    Ok(())
}
