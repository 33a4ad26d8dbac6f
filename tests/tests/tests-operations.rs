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
use dataverse_gen_schema_model::model::StructuralType;
use dataverse_gen_tests::generate;
use dataverse_gen_tests::names;
use dataverse_gen_tests::options;
use dataverse_gen_tests::Error;
use dataverse_gen_tests::DATAVERSE_EDMX;
use std::error::Error as StdError;
use tokio::test;

#[test]
async fn entity_set_bound_action() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&[], &["dev1_Escalate"], &[]), &["account"]).await?;
    assert_eq!(names(model.actions(), |a| a.name.as_str()), vec!["dev1_Escalate"]);
    assert_eq!(names(model.entity_types(), |e| e.name.as_str()), vec!["account"]);
    assert_eq!(model.entity_types()[0].referenced_by, vec!["dev1_Escalate"]);

    let escalate = &model.actions()[0];
    assert!(escalate.is_bound);
    assert_eq!(escalate.binding_parameter.as_deref(), Some("entityset"));
    let entityset = &escalate.parameters[0];
    assert_eq!(entityset.name, "entityset");
    assert_eq!(entityset.ptype, "mscrm.account");
    assert_eq!(entityset.structural_type, Some(StructuralType::EntityType));
    assert_eq!(
        names(&entityset.type_descriptors, |d| d.name.as_str()),
        vec!["EntityReference[]", "Account[]"]
    );

    let reason = &escalate.parameters[1];
    assert_eq!(reason.structural_type, Some(StructuralType::PrimitiveType));
    assert_eq!(names(&reason.type_descriptors, |d| d.name.as_str()), vec!["string"]);
    Ok(())
}

#[test]
async fn nested_complex_types_are_kept() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&[], &["dev1_CalculateQuote"], &[]), &[]).await?;
    assert_eq!(
        names(model.complex_types(), |c| c.name.as_str()),
        vec!["ObjectValue", "dev1_QuoteLine", "dev1_QuoteRequest"]
    );
    assert_eq!(names(model.enum_types(), |e| e.name.as_str()), vec!["dev1_LineStatus"]);
    assert!(model.entity_types().is_empty());

    let graph = model.graph();
    let request = graph
        .complex_type("dev1_QuoteRequest")
        .ok_or_else(|| Error::ExpectedItem("complex type", "dev1_QuoteRequest".into()))?;
    assert_eq!(request.referenced_by, vec!["dev1_CalculateQuote"]);
    assert_eq!(request.referenced_by_root, vec!["dev1_QuoteLine"]);
    let lines = request.properties.iter().find(|p| p.name == "Lines");
    assert_eq!(
        lines
            .and_then(|p| p.type_descriptor.as_ref())
            .map(|d| (d.output_type, d.name.as_str(), d.import_location.as_deref())),
        Some((
            OutputType::Complex,
            "dev1_QuoteLine[]",
            Some("../complextypes/dev1_QuoteLine")
        ))
    );

    let line = graph
        .complex_type("dev1_QuoteLine")
        .ok_or_else(|| Error::ExpectedItem("complex type", "dev1_QuoteLine".into()))?;
    assert!(line.referenced_by.is_empty());
    assert_eq!(line.referenced_by_root, vec!["dev1_QuoteRequest"]);
    let status = line
        .properties
        .iter()
        .find(|p| p.name == "Status")
        .ok_or_else(|| Error::ExpectedItem("property", "Status".into()))?;
    assert!(status.is_enum);
    assert_eq!(
        status.type_descriptor.as_ref().map(|d| d.output_type),
        Some(OutputType::Enum)
    );

    let line_status = graph
        .enum_type("dev1_LineStatus")
        .ok_or_else(|| Error::ExpectedItem("enum", "dev1_LineStatus".into()))?;
    assert_eq!(line_status.referenced_by_root, vec!["dev1_QuoteLine"]);
    assert_eq!(
        names(&line_status.members, |m| m.value.as_str()),
        vec!["0", "1", "2"]
    );
    Ok(())
}

#[test]
async fn object_return_type_is_renamed() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&[], &["dev1_CalculateQuote"], &[]), &[]).await?;
    let graph = model.graph();
    assert!(graph.complex_type("Object").is_none());
    let object = graph
        .complex_type("ObjectValue")
        .ok_or_else(|| Error::ExpectedItem("complex type", "ObjectValue".into()))?;
    assert_eq!(object.referenced_by, vec!["dev1_CalculateQuote"]);
    Ok(())
}

#[test]
async fn access_rights_members_in_numeric_order() -> Result<(), Box<dyn StdError>> {
    let model = generate(
        DATAVERSE_EDMX,
        options(&[], &[], &["RetrievePrincipalAccess"]),
        &[],
    )
    .await?;
    assert_eq!(
        names(model.complex_types(), |c| c.name.as_str()),
        vec!["RetrievePrincipalAccessResponse"]
    );
    let access_rights = model
        .graph()
        .enum_type("AccessRights")
        .ok_or_else(|| Error::ExpectedItem("enum", "AccessRights".into()))?;
    assert_eq!(
        access_rights.referenced_by_root,
        vec!["RetrievePrincipalAccessResponse"]
    );
    assert_eq!(
        names(&access_rights.members, |m| m.name.as_str()),
        vec![
            "None",
            "ReadAccess",
            "WriteAccess",
            "AppendAccess",
            "AppendToAccess",
            "CreateAccess",
            "DeleteAccess",
            "ShareAccess",
            "AssignAccess"
        ]
    );

    let target = model.functions()[0]
        .parameters
        .iter()
        .find(|p| p.name == "Target")
        .ok_or_else(|| Error::ExpectedItem("parameter", "Target".into()))?;
    assert_eq!(
        target
            .type_descriptors
            .iter()
            .map(|d| (d.name.as_str(), d.output_type))
            .collect::<Vec<_>>(),
        vec![("crmbaseentity", OutputType::Unknown)]
    );
    Ok(())
}

#[test]
async fn unbound_function_without_parameters() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&[], &[], &["WhoAmI"]), &[]).await?;
    let who_am_i = &model.functions()[0];
    assert!(!who_am_i.is_bound);
    assert_eq!(who_am_i.binding_parameter, None);
    assert!(who_am_i.parameters.is_empty());
    assert_eq!(who_am_i.return_type.as_deref(), Some("mscrm.WhoAmIResponse"));
    assert!(!who_am_i.returns_collection);

    let response = &model.complex_types()[0];
    assert_eq!(response.name, "WhoAmIResponse");
    assert_eq!(
        names(&response.properties, |p| p.name.as_str()),
        vec!["BusinessUnitId", "OrganizationId", "UserId"]
    );
    assert!(response
        .properties
        .iter()
        .all(|p| p.nullable == Some(false) && p.ptype == "Edm.Guid"));
    Ok(())
}

#[test]
async fn unselected_operations_are_dropped() -> Result<(), Box<dyn StdError>> {
    let model = generate(DATAVERSE_EDMX, options(&[], &["dev1_CalculateQuote"], &[]), &[]).await?;
    assert_eq!(names(model.actions(), |a| a.name.as_str()), vec!["dev1_CalculateQuote"]);
    assert!(model.functions().is_empty());
    assert!(model.graph().complex_type("WhoAmIResponse").is_none());
    assert!(model.graph().complex_type("Unused").is_none());
    assert!(model.graph().enum_type("AccessRights").is_none());
    Ok(())
}

#[test]
async fn filtered_model_is_closed() -> Result<(), Box<dyn StdError>> {
    let requested = ["contact"];
    let model = generate(
        DATAVERSE_EDMX,
        options(
            &requested,
            &["WinOpportunity", "dev1_CalculateQuote", "dev1_Escalate"],
            &["RetrievePrincipalAccess", "WhoAmI"],
        ),
        &["account", "contact"],
    )
    .await?;
    assert_eq!(
        names(model.entity_types(), |e| e.name.as_str()),
        vec!["account", "contact"]
    );
    for complex_type in model.complex_types() {
        assert!(
            !complex_type.referenced_by.is_empty() || !complex_type.referenced_by_root.is_empty(),
            "{} is not referenced",
            complex_type.name
        );
    }
    // Enums registered from option sets are referenced by their entity.
    for enum_type in model.enum_types() {
        assert!(
            !enum_type.referenced_by.is_empty() || !enum_type.referenced_by_root.is_empty(),
            "{} is not referenced",
            enum_type.name
        );
    }
    for entity in model.entity_types() {
        assert!(
            !entity.referenced_by.is_empty() || requested.contains(&entity.name.as_str()),
            "{} is neither referenced nor requested",
            entity.name
        );
    }
    Ok(())
}
