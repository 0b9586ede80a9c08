//! Dispatch Engine
//!
//! Delivers configuration values to an algorithm through the capability that
//! matches each value's kind, and hands typed result sinks to every result
//! capability it declared.
//!
//! Delivery is all-or-nothing with respect to capabilities: every pair is
//! checked against the cached capability set before the first setter runs.
//! Values are then delivered one at a time in declared order, since later
//! setters may depend on state an earlier one established.

use crate::configuration::{ConfigurationRequirement, ConfigurationValue, ValuePayload};
use crate::core::shutdown::CancellationFlag;
use crate::plugin::capability::{CapabilityCategory, CapabilityKind, CapabilitySet};
use crate::plugin::error::{AlgorithmError, PluginError, PluginResult};
use crate::plugin::traits::Algorithm;
use crate::receiver::{SharedReceiver, TypedSink};

/// One declared requirement and the value built for it
pub type ConfigurationPair = (ConfigurationRequirement, ConfigurationValue);

enum DeliveryFailure {
    Missing(CapabilityKind),
    Rejected(AlgorithmError),
}

/// Deliver `pairs` in order. Returns the number of values delivered.
///
/// On `ConfigurationRejected` or `Cancelled` some values may already be
/// applied and the instance must be discarded.
pub fn dispatch_configuration(
    algorithm: &mut dyn Algorithm,
    plugin_name: &str,
    capabilities: &CapabilitySet,
    pairs: &[ConfigurationPair],
    cancellation: &CancellationFlag,
) -> PluginResult<usize> {
    for (requirement, value) in pairs {
        check_pair(plugin_name, capabilities, requirement, value)?;
    }

    for (delivered, (requirement, value)) in pairs.iter().enumerate() {
        if cancellation.is_cancelled() {
            log::info!(
                "Configuration of '{}' cancelled after {} of {} values",
                plugin_name,
                delivered,
                pairs.len()
            );
            return Err(PluginError::Cancelled {
                plugin_name: plugin_name.to_string(),
            });
        }

        log::trace!("Delivering '{}' to '{}'", requirement.identifier(), plugin_name);
        deliver(algorithm, value).map_err(|failure| match failure {
            DeliveryFailure::Missing(capability) => PluginError::MissingCapability {
                plugin_name: plugin_name.to_string(),
                requirement: requirement.identifier().to_string(),
                capability,
            },
            DeliveryFailure::Rejected(cause) => PluginError::ConfigurationRejected {
                plugin_name: plugin_name.to_string(),
                requirement: requirement.identifier().to_string(),
                cause: cause.to_string(),
            },
        })?;
    }

    Ok(pairs.len())
}

fn check_pair(
    plugin_name: &str,
    capabilities: &CapabilitySet,
    requirement: &ConfigurationRequirement,
    value: &ConfigurationValue,
) -> PluginResult<()> {
    if !requirement.matches(value) {
        return Err(PluginError::ConfigurationRejected {
            plugin_name: plugin_name.to_string(),
            requirement: requirement.identifier().to_string(),
            cause: format!(
                "value '{}' of kind {} does not belong to this {} requirement",
                value.identifier(),
                value.kind(),
                requirement.value_kind()
            ),
        });
    }

    let capability = CapabilityKind::for_value_kind(value.kind());
    if !capabilities.satisfies(capability) {
        return Err(PluginError::MissingCapability {
            plugin_name: plugin_name.to_string(),
            requirement: requirement.identifier().to_string(),
            capability,
        });
    }
    Ok(())
}

fn deliver(
    algorithm: &mut dyn Algorithm,
    value: &ConfigurationValue,
) -> Result<(), DeliveryFailure> {
    let id = value.identifier();
    let outcome = match value.payload() {
        ValuePayload::String(values) => algorithm
            .as_string_parameter()
            .map(|a| a.set_string_configuration_value(id, values)),
        ValuePayload::Boolean(values) => algorithm
            .as_boolean_parameter()
            .map(|a| a.set_boolean_configuration_value(id, values)),
        ValuePayload::Integer(values) => algorithm
            .as_integer_parameter()
            .map(|a| a.set_integer_configuration_value(id, values)),
        ValuePayload::ListBox(selected) => algorithm
            .as_list_box_parameter()
            .map(|a| a.set_list_box_configuration_value(id, selected)),
        ValuePayload::CheckBox(selected) => algorithm
            .as_check_box_parameter()
            .map(|a| a.set_check_box_configuration_value(id, selected)),
        ValuePayload::FileInput(files) => algorithm
            .as_file_input_parameter()
            .map(|a| a.set_file_input_configuration_value(id, files)),
        ValuePayload::RelationalInput(inputs) => algorithm
            .as_relational_input_parameter()
            .map(|a| a.set_relational_input_configuration_value(id, inputs)),
        ValuePayload::TableInput(tables) => algorithm
            .as_table_input_parameter()
            .map(|a| a.set_table_input_configuration_value(id, tables)),
        ValuePayload::DatabaseConnection(connections) => algorithm
            .as_database_connection_parameter()
            .map(|a| a.set_database_connection_configuration_value(id, connections)),
    };

    match outcome {
        // the accessor disagreed with the cached capability set
        None => Err(DeliveryFailure::Missing(CapabilityKind::for_value_kind(
            value.kind(),
        ))),
        Some(Err(e)) => Err(DeliveryFailure::Rejected(e)),
        Some(Ok(())) => Ok(()),
    }
}

/// Hand a typed sink for each declared result capability to the algorithm.
/// Returns the capabilities that received a sink.
pub fn attach_result_sinks(
    algorithm: &mut dyn Algorithm,
    plugin_name: &str,
    capabilities: &CapabilitySet,
    receiver: &SharedReceiver,
    cancellation: &CancellationFlag,
) -> PluginResult<Vec<CapabilityKind>> {
    let mut attached = Vec::new();
    for kind in capabilities.in_category(CapabilityCategory::Result) {
        let sink_taken = match kind {
            CapabilityKind::FunctionalDependency => algorithm
                .as_functional_dependency()
                .map(|a| a.set_functional_dependency_receiver(sink(receiver, cancellation))),
            CapabilityKind::InclusionDependency => algorithm
                .as_inclusion_dependency()
                .map(|a| a.set_inclusion_dependency_receiver(sink(receiver, cancellation))),
            CapabilityKind::UniqueColumnCombination => algorithm
                .as_unique_column_combination()
                .map(|a| a.set_unique_column_combination_receiver(sink(receiver, cancellation))),
            CapabilityKind::ConditionalUniqueColumnCombination => algorithm
                .as_conditional_unique_column_combination()
                .map(|a| {
                    a.set_conditional_unique_column_combination_receiver(sink(
                        receiver,
                        cancellation,
                    ))
                }),
            CapabilityKind::OrderDependency => algorithm
                .as_order_dependency()
                .map(|a| a.set_order_dependency_receiver(sink(receiver, cancellation))),
            CapabilityKind::BasicStatistic => algorithm
                .as_basic_statistic()
                .map(|a| a.set_basic_statistic_receiver(sink(receiver, cancellation))),
            _ => Some(()),
        };

        if sink_taken.is_none() {
            return Err(PluginError::MissingCapability {
                plugin_name: plugin_name.to_string(),
                requirement: "result receiver".to_string(),
                capability: kind,
            });
        }
        attached.push(kind);
    }
    Ok(attached)
}

fn sink<R: crate::results::ResultVariant>(
    receiver: &SharedReceiver,
    cancellation: &CancellationFlag,
) -> TypedSink<R> {
    TypedSink::new(receiver.clone(), cancellation.clone())
}
