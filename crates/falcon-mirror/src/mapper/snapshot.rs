//! HDFS snapshot replication property table.

use crate::codec::Frequency;
use crate::entity::{NotificationSpec, ProcessEntity};
use crate::error::MappingError;
use crate::model::{SnapshotEndpoint, SnapshotUiModel};

use super::common::{encode_header, run_on_for, Header, HeaderRef};
use super::properties::{join_receivers, split_receivers, write_property, PropertyMap};

const EMAIL_NOTIFICATION: &str = "email";

/// Properties owned by the snapshot mapping.
pub const PROPERTIES: &[&str] = &[
    "distcpMaxMaps",
    "distcpMapBandwidth",
    "tdeEncryptionEnabled",
    "sourceCluster",
    "targetCluster",
    "sourceSnapshotDir",
    "targetSnapshotDir",
    "sourceSnapshotRetentionNumber",
    "targetSnapshotRetentionNumber",
    "sourceSnapshotRetentionAgeLimit",
    "targetSnapshotRetentionAgeLimit",
];

pub(crate) fn decode(
    process: &ProcessEntity,
    header: Header,
) -> Result<SnapshotUiModel, MappingError> {
    let props = PropertyMap::from_process(process);
    let (mut ui, primary) = header.into_snapshot();

    ui.allocation.distcp_max_maps = props.number("distcpMaxMaps")?;
    ui.allocation.distcp_map_bandwidth = props.number("distcpMapBandwidth")?;
    ui.tde_encryption_enabled = props
        .get("tdeEncryptionEnabled")
        .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

    decode_endpoint(&props, "source", &mut ui.source)?;
    decode_endpoint(&props, "target", &mut ui.target)?;

    ui.alerts = process
        .notification()
        .map(|n| split_receivers(&n.to))
        .unwrap_or_default();
    ui.run_on = run_on_for(&primary, &ui.target.cluster);

    Ok(ui)
}

fn decode_endpoint(
    props: &PropertyMap,
    side: &str,
    endpoint: &mut SnapshotEndpoint,
) -> Result<(), MappingError> {
    endpoint.cluster = props.string(&format!("{}Cluster", side));
    endpoint.directory_path = props.string(&format!("{}SnapshotDir", side));
    if let Some(number) = props.number(&format!("{}SnapshotRetentionNumber", side))? {
        endpoint.retention_number = number;
    }
    match props.get(&format!("{}SnapshotRetentionAgeLimit", side)) {
        Some(limit) if !limit.trim().is_empty() => {
            endpoint.delete_frequency = Frequency::decode(limit)?;
        }
        _ => {}
    }
    Ok(())
}

pub(crate) fn encode(ui: &SnapshotUiModel, process: &mut ProcessEntity) -> Result<(), MappingError> {
    for (side, endpoint) in [("source", &ui.source), ("target", &ui.target)] {
        if endpoint.cluster.is_empty() {
            return Err(MappingError::missing(format!("{}Cluster", side)));
        }
        if endpoint.directory_path.trim().is_empty() {
            return Err(MappingError::missing(format!("{}SnapshotDir", side)));
        }
    }

    encode_header(process, &HeaderRef::snapshot(ui))?;

    let optional = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();
    write_property(
        process,
        "distcpMaxMaps",
        &optional(ui.allocation.distcp_max_maps),
    );
    write_property(
        process,
        "distcpMapBandwidth",
        &optional(ui.allocation.distcp_map_bandwidth),
    );
    write_property(
        process,
        "tdeEncryptionEnabled",
        &ui.tde_encryption_enabled.to_string(),
    );

    for (side, endpoint) in [("source", &ui.source), ("target", &ui.target)] {
        write_property(process, &format!("{}Cluster", side), &endpoint.cluster);
        write_property(
            process,
            &format!("{}SnapshotDir", side),
            endpoint.directory_path.trim(),
        );
        write_property(
            process,
            &format!("{}SnapshotRetentionNumber", side),
            &endpoint.retention_number.to_string(),
        );
        write_property(
            process,
            &format!("{}SnapshotRetentionAgeLimit", side),
            &endpoint.delete_frequency.encode(),
        );
    }

    encode_notification(process, &ui.alerts);
    Ok(())
}

/// Alerts live in the `<notification>` element. Without alerts an existing
/// element is kept and pointed at `NA`.
fn encode_notification(process: &mut ProcessEntity, alerts: &[String]) {
    let existing = process.notification();
    if alerts.is_empty() && existing.is_none() {
        return;
    }

    let to = join_receivers(alerts, existing.as_ref().map(|n| n.to.as_str()));
    let kind = existing
        .map(|n| n.kind)
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| EMAIL_NOTIFICATION.to_string());
    process.set_notification(&NotificationSpec { kind, to });
}
