//! IMS Simple Sequencing subtree reading (`<imsss:sequencing>`).

use crate::deserialize::xml;
use crate::warnings::Warnings;
use models::scorm::sequencing::{
    ChildActivitySet, ConditionCombination, ConditionOperator, ControlMode, DeliveryControls,
    LimitConditions, Objective, ObjectiveMapping, Objectives, RandomizationControls,
    RandomizationTiming, RollupAction, RollupCondition, RollupConditions, RollupConsideration,
    RollupConsiderations, RollupRule, RollupRuleCondition, RollupRules, RuleAction, RuleCondition,
    RuleConditions, Sequencing, SequencingRule, SequencingRuleCondition, SequencingRules,
};
use roxmltree::Node;
use std::str::FromStr;
use std::time::Duration;

pub fn read_sequencing(node: Node, path: &str, warnings: &mut Warnings) -> Sequencing {
    Sequencing {
        id: xml::attribute(node, "id").map(str::to_string),
        control_mode: xml::child(node, "controlMode")
            .map(|control| read_control_mode(control, path, warnings)),
        sequencing_rules: xml::child(node, "sequencingRules")
            .map(|rules| read_sequencing_rules(rules, path, warnings)),
        limit_conditions: xml::child(node, "limitConditions")
            .map(|limits| read_limit_conditions(limits, path, warnings)),
        rollup_rules: xml::child(node, "rollupRules")
            .map(|rollup| read_rollup_rules(rollup, path, warnings)),
        objectives: xml::child(node, "objectives")
            .map(|objectives| read_objectives(objectives, path, warnings)),
        randomization_controls: xml::child(node, "randomizationControls")
            .map(|controls| read_randomization_controls(controls, path, warnings)),
        delivery_controls: xml::child(node, "deliveryControls")
            .map(|controls| read_delivery_controls(controls, path, warnings)),
        rollup_considerations: xml::child(node, "rollupConsiderations")
            .map(|considerations| read_rollup_considerations(considerations, path, warnings)),
    }
}

fn read_control_mode(node: Node, path: &str, warnings: &mut Warnings) -> ControlMode {
    ControlMode {
        choice: xml::attribute_bool(node, "choice", true, path, warnings),
        choice_exit: xml::attribute_bool(node, "choiceExit", true, path, warnings),
        flow: xml::attribute_bool(node, "flow", false, path, warnings),
        forward_only: xml::attribute_bool(node, "forwardOnly", false, path, warnings),
        use_current_attempt_objective_info: xml::attribute_bool(
            node,
            "useCurrentAttemptObjectiveInfo",
            true,
            path,
            warnings,
        ),
        use_current_attempt_progress_info: xml::attribute_bool(
            node,
            "useCurrentAttemptProgressInfo",
            true,
            path,
            warnings,
        ),
    }
}

fn read_sequencing_rules(node: Node, path: &str, warnings: &mut Warnings) -> SequencingRules {
    SequencingRules {
        pre_condition_rules: read_rule_set(node, "preConditionRule", path, warnings),
        post_condition_rules: read_rule_set(node, "postConditionRule", path, warnings),
        exit_condition_rules: read_rule_set(node, "exitConditionRule", path, warnings),
    }
}

fn read_rule_set(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Vec<SequencingRule> {
    xml::children(node, name)
        .filter_map(|rule| read_sequencing_rule(rule, path, warnings))
        .collect()
}

fn read_sequencing_rule(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> Option<SequencingRule> {
    let action_raw = xml::child(node, "ruleAction")
        .and_then(|action| xml::attribute(action, "action"))
        .map(str::trim)
        .unwrap_or_default();
    let action = match RuleAction::from_str(action_raw) {
        Ok(action) => action,
        Err(_) => {
            warnings.push(
                format!("{path}/ruleAction"),
                format_args!("unrecognized rule action '{action_raw}', dropping rule"),
            );
            return None;
        }
    };

    Some(SequencingRule {
        conditions: xml::child(node, "ruleConditions")
            .map(|conditions| read_rule_conditions(conditions, path, warnings))
            .unwrap_or_default(),
        action,
    })
}

fn read_rule_conditions(node: Node, path: &str, warnings: &mut Warnings) -> RuleConditions {
    RuleConditions {
        condition_combination: read_combination(
            node,
            ConditionCombination::All,
            path,
            warnings,
        ),
        conditions: xml::children(node, "ruleCondition")
            .filter_map(|condition| read_rule_condition(condition, path, warnings))
            .collect(),
    }
}

fn read_combination(
    node: Node,
    default: ConditionCombination,
    path: &str,
    warnings: &mut Warnings,
) -> ConditionCombination {
    match xml::attribute(node, "conditionCombination") {
        None => default,
        Some(raw) => ConditionCombination::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@conditionCombination"),
                format_args!("unrecognized combination '{raw}', using {default}"),
            );
            default
        }),
    }
}

fn read_rule_condition(node: Node, path: &str, warnings: &mut Warnings) -> Option<RuleCondition> {
    let raw = xml::attribute(node, "condition").map(str::trim).unwrap_or_default();
    let condition = match SequencingRuleCondition::from_str(raw) {
        Ok(condition) => condition,
        Err(_) => {
            warnings.push(
                format!("{path}/ruleCondition"),
                format_args!("unrecognized condition '{raw}', dropping"),
            );
            return None;
        }
    };
    Some(RuleCondition {
        referenced_objective: xml::attribute(node, "referencedObjective").map(str::to_string),
        measure_threshold: xml::attribute_f64(node, "measureThreshold", path, warnings),
        operator: read_operator(node, path, warnings),
        condition,
    })
}

fn read_operator(node: Node, path: &str, warnings: &mut Warnings) -> ConditionOperator {
    match xml::attribute(node, "operator") {
        None => ConditionOperator::NoOp,
        Some(raw) => ConditionOperator::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@operator"),
                format_args!("unrecognized operator '{raw}', using noOp"),
            );
            ConditionOperator::NoOp
        }),
    }
}

fn read_limit_conditions(node: Node, path: &str, warnings: &mut Warnings) -> LimitConditions {
    LimitConditions {
        attempt_limit: xml::attribute_uint(node, "attemptLimit", path, warnings),
        attempt_absolute_duration_limit: duration_attribute(
            node,
            "attemptAbsoluteDurationLimit",
            path,
            warnings,
        ),
        attempt_experienced_duration_limit: duration_attribute(
            node,
            "attemptExperiencedDurationLimit",
            path,
            warnings,
        ),
        activity_absolute_duration_limit: duration_attribute(
            node,
            "activityAbsoluteDurationLimit",
            path,
            warnings,
        ),
        activity_experienced_duration_limit: duration_attribute(
            node,
            "activityExperiencedDurationLimit",
            path,
            warnings,
        ),
        begin_time_limit: xml::attribute(node, "beginTimeLimit").map(str::to_string),
        end_time_limit: xml::attribute(node, "endTimeLimit").map(str::to_string),
    }
}

fn duration_attribute(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> Option<Duration> {
    let raw = xml::attribute(node, name)?;
    match xml::parse_iso8601_duration(raw) {
        Some(duration) => Some(duration),
        None => {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("unparseable duration '{raw}', ignoring"),
            );
            None
        }
    }
}

fn read_rollup_rules(node: Node, path: &str, warnings: &mut Warnings) -> RollupRules {
    RollupRules {
        rollup_objective_satisfied: xml::attribute_bool(
            node,
            "rollupObjectiveSatisfied",
            true,
            path,
            warnings,
        ),
        rollup_progress_completion: xml::attribute_bool(
            node,
            "rollupProgressCompletion",
            true,
            path,
            warnings,
        ),
        objective_measure_weight: xml::attribute_f64(
            node,
            "objectiveMeasureWeight",
            path,
            warnings,
        )
        .unwrap_or(1.0),
        rules: xml::children(node, "rollupRule")
            .filter_map(|rule| read_rollup_rule(rule, path, warnings))
            .collect(),
    }
}

fn read_rollup_rule(node: Node, path: &str, warnings: &mut Warnings) -> Option<RollupRule> {
    let action_raw = xml::child(node, "rollupAction")
        .and_then(|action| xml::attribute(action, "action"))
        .map(str::trim)
        .unwrap_or_default();
    let action = match RollupAction::from_str(action_raw) {
        Ok(action) => action,
        Err(_) => {
            warnings.push(
                format!("{path}/rollupAction"),
                format_args!("unrecognized rollup action '{action_raw}', dropping rule"),
            );
            return None;
        }
    };

    Some(RollupRule {
        child_activity_set: match xml::attribute(node, "childActivitySet") {
            None => ChildActivitySet::All,
            Some(raw) => ChildActivitySet::from_str(raw.trim()).unwrap_or_else(|_| {
                warnings.push(
                    format!("{path}@childActivitySet"),
                    format_args!("unrecognized child activity set '{raw}', using all"),
                );
                ChildActivitySet::All
            }),
        },
        minimum_count: xml::attribute_uint(node, "minimumCount", path, warnings),
        minimum_percent: xml::attribute_f64(node, "minimumPercent", path, warnings),
        conditions: xml::child(node, "rollupConditions")
            .map(|conditions| RollupConditions {
                // The schema default for rollup is `any`, unlike rule
                // conditions which default to `all`.
                condition_combination: read_combination(
                    conditions,
                    ConditionCombination::Any,
                    path,
                    warnings,
                ),
                conditions: xml::children(conditions, "rollupCondition")
                    .filter_map(|condition| read_rollup_condition(condition, path, warnings))
                    .collect(),
            })
            .unwrap_or_default(),
        action,
    })
}

fn read_rollup_condition(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> Option<RollupCondition> {
    let raw = xml::attribute(node, "condition").map(str::trim).unwrap_or_default();
    let condition = match RollupRuleCondition::from_str(raw) {
        Ok(condition) => condition,
        Err(_) => {
            warnings.push(
                format!("{path}/rollupCondition"),
                format_args!("unrecognized rollup condition '{raw}', dropping"),
            );
            return None;
        }
    };
    Some(RollupCondition {
        operator: read_operator(node, path, warnings),
        condition,
    })
}

fn read_objectives(node: Node, path: &str, warnings: &mut Warnings) -> Objectives {
    Objectives {
        primary_objective: xml::child(node, "primaryObjective")
            .map(|objective| read_objective(objective, path, warnings)),
        objectives: xml::children(node, "objective")
            .map(|objective| read_objective(objective, path, warnings))
            .collect(),
    }
}

fn read_objective(node: Node, path: &str, warnings: &mut Warnings) -> Objective {
    Objective {
        id: xml::attribute(node, "objectiveID").map(str::to_string),
        satisfied_by_measure: xml::attribute_bool(
            node,
            "satisfiedByMeasure",
            false,
            path,
            warnings,
        ),
        minimum_normalized_measure: xml::child_text(node, "minNormalizedMeasure")
            .and_then(|raw| match raw.trim().parse::<f64>() {
                Ok(measure) => Some(measure),
                Err(_) => {
                    warnings.push(
                        format!("{path}/minNormalizedMeasure"),
                        format_args!("invalid measure '{raw}', using 1.0"),
                    );
                    None
                }
            })
            .unwrap_or(1.0),
        mappings: xml::children(node, "mapInfo")
            .filter_map(|map_info| read_mapping(map_info, path, warnings))
            .collect(),
    }
}

fn read_mapping(node: Node, path: &str, warnings: &mut Warnings) -> Option<ObjectiveMapping> {
    let target = match xml::attribute(node, "targetObjectiveID") {
        Some(target) if !target.is_empty() => target.to_string(),
        _ => {
            warnings.push(
                format!("{path}/mapInfo"),
                "objective mapping without a targetObjectiveID, dropping",
            );
            return None;
        }
    };
    Some(ObjectiveMapping {
        target_objective_id: target,
        read_satisfied_status: xml::attribute_bool(
            node,
            "readSatisfiedStatus",
            true,
            path,
            warnings,
        ),
        read_normalized_measure: xml::attribute_bool(
            node,
            "readNormalizedMeasure",
            true,
            path,
            warnings,
        ),
        read_completion_status: xml::attribute_bool(
            node,
            "readCompletionStatus",
            true,
            path,
            warnings,
        ),
        read_progress_measure: xml::attribute_bool(
            node,
            "readProgressMeasure",
            true,
            path,
            warnings,
        ),
        write_satisfied_status: xml::attribute_bool(
            node,
            "writeSatisfiedStatus",
            false,
            path,
            warnings,
        ),
        write_normalized_measure: xml::attribute_bool(
            node,
            "writeNormalizedMeasure",
            false,
            path,
            warnings,
        ),
        write_completion_status: xml::attribute_bool(
            node,
            "writeCompletionStatus",
            false,
            path,
            warnings,
        ),
        write_progress_measure: xml::attribute_bool(
            node,
            "writeProgressMeasure",
            false,
            path,
            warnings,
        ),
    })
}

fn read_randomization_controls(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> RandomizationControls {
    RandomizationControls {
        randomization_timing: timing_attribute(node, "randomizationTiming", path, warnings),
        select_count: xml::attribute_uint(node, "selectCount", path, warnings),
        reorder_children: xml::attribute_bool(node, "reorderChildren", false, path, warnings),
        selection_timing: timing_attribute(node, "selectionTiming", path, warnings),
    }
}

fn timing_attribute(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> RandomizationTiming {
    match xml::attribute(node, name) {
        None => RandomizationTiming::Never,
        Some(raw) => RandomizationTiming::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("unrecognized timing '{raw}', using never"),
            );
            RandomizationTiming::Never
        }),
    }
}

fn read_delivery_controls(node: Node, path: &str, warnings: &mut Warnings) -> DeliveryControls {
    DeliveryControls {
        tracked: xml::attribute_bool(node, "tracked", true, path, warnings),
        completion_set_by_content: xml::attribute_bool(
            node,
            "completionSetByContent",
            false,
            path,
            warnings,
        ),
        objective_set_by_content: xml::attribute_bool(
            node,
            "objectiveSetByContent",
            false,
            path,
            warnings,
        ),
    }
}

fn read_rollup_considerations(
    node: Node,
    path: &str,
    warnings: &mut Warnings,
) -> RollupConsiderations {
    RollupConsiderations {
        required_for_satisfied: consideration_attribute(node, "requiredForSatisfied", path, warnings),
        required_for_not_satisfied: consideration_attribute(
            node,
            "requiredForNotSatisfied",
            path,
            warnings,
        ),
        required_for_completed: consideration_attribute(node, "requiredForCompleted", path, warnings),
        required_for_incomplete: consideration_attribute(
            node,
            "requiredForIncomplete",
            path,
            warnings,
        ),
        measure_satisfaction_if_active: xml::attribute_bool(
            node,
            "measureSatisfactionIfActive",
            true,
            path,
            warnings,
        ),
    }
}

fn consideration_attribute(
    node: Node,
    name: &str,
    path: &str,
    warnings: &mut Warnings,
) -> RollupConsideration {
    match xml::attribute(node, name) {
        None => RollupConsideration::Always,
        Some(raw) => RollupConsideration::from_str(raw.trim()).unwrap_or_else(|_| {
            warnings.push(
                format!("{path}@{name}"),
                format_args!("unrecognized consideration '{raw}', using always"),
            );
            RollupConsideration::Always
        }),
    }
}
