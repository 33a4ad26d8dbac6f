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

//! Reference filter.
//!
//! Mark and sweep over the schema graph. Roots are the actions and
//! functions named in the options, plus the entities named there. A
//! complex type or enum survives if a selected operation uses it, or if
//! it is reachable through the properties of a surviving complex type.

use crate::config::DataverseGenOptions;
use crate::edmx::type_ref::short_name;
use crate::edmx::type_ref::strip_collection;
use crate::model::SchemaGraph;
use log::debug;
use log::info;

/// Prune `graph` to what the allow-lists of `options` reach.
pub fn filter(graph: &mut SchemaGraph, options: &DataverseGenOptions) {
    graph.actions.retain(|a| options.actions.contains(&a.name));
    graph.functions.retain(|f| options.functions.contains(&f.name));

    let references: Vec<(String, String)> = graph
        .operations()
        .flat_map(|op| {
            op.parameters
                .iter()
                .map(|p| p.ptype.as_str())
                .chain(op.return_type.as_deref())
                .map(move |t| (op.name.clone(), short_name(strip_collection(t)).to_string()))
        })
        .collect();
    for (referrer, type_name) in references {
        add_direct_reference(graph, referrer, &type_name);
    }

    let roots: Vec<usize> = graph
        .complex_types
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.referenced_by.is_empty())
        .map(|(i, _)| i)
        .collect();
    for root in roots {
        mark_reachable(graph, root);
    }

    graph
        .entity_types
        .retain(|e| !e.referenced_by.is_empty() || options.entities.contains(&e.name));
    graph
        .complex_types
        .retain(|c| !c.referenced_by.is_empty() || !c.referenced_by_root.is_empty());
    graph
        .enum_types
        .retain(|e| !e.referenced_by.is_empty() || !e.referenced_by_root.is_empty());

    info!(
        "Filtered model: {} entities, {} actions, {} functions, {} complex types, {} enums",
        graph.entity_types.len(),
        graph.actions.len(),
        graph.functions.len(),
        graph.complex_types.len(),
        graph.enum_types.len(),
    );
}

fn push_unique(list: &mut Vec<String>, name: String) -> bool {
    if list.contains(&name) {
        false
    } else {
        list.push(name);
        true
    }
}

/// Complex types win over entities, entities over enums.
fn add_direct_reference(graph: &mut SchemaGraph, referrer: String, type_name: &str) {
    if let Some(c) = graph.complex_types.iter_mut().find(|c| c.name == type_name) {
        push_unique(&mut c.referenced_by, referrer);
    } else if let Some(e) = graph.entity_types.iter_mut().find(|e| e.name == type_name) {
        push_unique(&mut e.referenced_by, referrer);
    } else if let Some(e) = graph.enum_types.iter_mut().find(|e| e.name == type_name) {
        push_unique(&mut e.referenced_by, referrer);
    }
}

/// Mark complex types and enums reachable from the complex type at
/// `root`. An edge is followed once, so cycles terminate.
fn mark_reachable(graph: &mut SchemaGraph, root: usize) {
    let mut pending = vec![root];
    while let Some(current) = pending.pop() {
        let referrer = graph.complex_types[current].name.clone();
        let property_types: Vec<String> = graph.complex_types[current]
            .properties
            .iter()
            .map(|p| short_name(strip_collection(&p.ptype)).to_string())
            .collect();
        for type_name in property_types {
            if let Some(i) = graph.complex_types.iter().position(|c| c.name == type_name) {
                if push_unique(&mut graph.complex_types[i].referenced_by_root, referrer.clone()) {
                    debug!("{type_name} is reachable from {referrer}");
                    pending.push(i);
                }
            } else if let Some(e) = graph.enum_types.iter_mut().find(|e| e.name == type_name) {
                push_unique(&mut e.referenced_by_root, referrer.clone());
            }
        }
    }
}
