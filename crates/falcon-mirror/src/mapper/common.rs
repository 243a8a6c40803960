//! Fields every job sub-type shares: name, tags, validity, frequency, retry and ACL.

use crate::codec::date::{export_instant, import_instant};
use crate::codec::tags::{
    decode_tags, decode_user_tags, encode_tags, Tag, EXTENSION_JOB_TAG, EXTENSION_NAME_TAG,
};
use crate::codec::Frequency;
use crate::entity::{AclSpec, ProcessCluster, ProcessEntity, RetrySpec};
use crate::error::MappingError;
use crate::model::common::default_timezone;
use crate::model::{
    Acl, DatasetUiModel, JobSubtype, MirrorType, Retry, RunOn, SnapshotUiModel, Validity,
};

use super::DecodeMode;

/// Header fields read from a process document.
#[derive(Debug, Clone)]
pub(crate) struct Header {
    pub name: String,
    /// Name of the cluster the process runs on.
    pub cluster: String,
    pub validity: Validity,
    pub frequency: Option<Frequency>,
    pub retry: Retry,
    pub acl: Acl,
    pub tags: Vec<Tag>,
}

/// Header fields to write, borrowed from a UI model.
pub(crate) struct HeaderRef<'a> {
    pub subtype: JobSubtype,
    pub name: &'a str,
    pub cluster: &'a str,
    pub validity: &'a Validity,
    pub frequency: &'a Frequency,
    pub retry: &'a Retry,
    pub acl: &'a Acl,
    pub tags: &'a [Tag],
}

impl Header {
    /// Starts a dataset model from the header. Returns the primary cluster name.
    pub fn into_dataset(self, form_type: MirrorType) -> (DatasetUiModel, String) {
        let mut ui = DatasetUiModel::new(form_type);
        ui.name = self.name;
        ui.validity = self.validity;
        if let Some(frequency) = self.frequency {
            ui.frequency = frequency;
        }
        ui.retry = self.retry;
        ui.acl = self.acl;
        ui.tags = self.tags;
        (ui, self.cluster)
    }

    /// Starts a snapshot model from the header. Returns the primary cluster name.
    pub fn into_snapshot(self) -> (SnapshotUiModel, String) {
        let mut ui = SnapshotUiModel {
            name: self.name,
            validity: self.validity,
            retry: self.retry,
            acl: self.acl,
            tags: self.tags,
            ..SnapshotUiModel::default()
        };
        if let Some(frequency) = self.frequency {
            ui.frequency = frequency;
        }
        (ui, self.cluster)
    }
}

impl<'a> HeaderRef<'a> {
    pub fn dataset(ui: &'a DatasetUiModel) -> Self {
        Self {
            subtype: ui.form_type.into(),
            name: &ui.name,
            cluster: &ui.run_on_endpoint().cluster,
            validity: &ui.validity,
            frequency: &ui.frequency,
            retry: &ui.retry,
            acl: &ui.acl,
            tags: &ui.tags,
        }
    }

    pub fn snapshot(ui: &'a SnapshotUiModel) -> Self {
        Self {
            subtype: JobSubtype::Snapshot,
            name: &ui.name,
            cluster: ui.run_on_cluster(),
            validity: &ui.validity,
            frequency: &ui.frequency,
            retry: &ui.retry,
            acl: &ui.acl,
            tags: &ui.tags,
        }
    }
}

/// Side whose cluster is `job_cluster`: the target when it matches, else the source.
pub(crate) fn run_on_for(job_cluster: &str, target: &str) -> RunOn {
    if !job_cluster.is_empty() && job_cluster == target {
        RunOn::Target
    } else {
        RunOn::Source
    }
}

/// Side named by a HIVE job's `clusterForJobRun`: the source when it matches,
/// else the target.
pub(crate) fn run_on_for_job_run(job_cluster: &str, source: &str) -> RunOn {
    if job_cluster == source {
        RunOn::Source
    } else {
        RunOn::Target
    }
}

pub(crate) fn decode_header(
    process: &ProcessEntity,
    mode: DecodeMode,
) -> Result<Header, MappingError> {
    let timezone = process
        .timezone()
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(default_timezone);

    let primary = process.primary_cluster().unwrap_or_default();
    let validity = Validity {
        start: import_optional(&primary.start, &timezone)?,
        end: import_optional(&primary.end, &timezone)?,
        timezone,
    };

    let frequency = match process.frequency() {
        Some(value) if !value.is_empty() => Some(Frequency::decode(&value)?),
        _ => None,
    };

    let mut retry = Retry::default();
    if let Some(spec) = process.retry() {
        if !spec.policy.is_empty() {
            retry.policy = spec.policy;
        }
        if !spec.delay.is_empty() {
            retry.delay = Frequency::decode(&spec.delay)?;
        }
        if !spec.attempts.trim().is_empty() {
            retry.attempts =
                spec.attempts
                    .trim()
                    .parse()
                    .map_err(|_| MappingError::InvalidNumber {
                        field: "retry.attempts".to_string(),
                        value: spec.attempts.clone(),
                    })?;
        }
    }

    let acl = match process.acl() {
        Some(spec) => Acl {
            owner: spec.owner,
            group: spec.group,
            permission: spec.permission,
        },
        None => Acl::default(),
    };

    let name = match mode {
        DecodeMode::Edit => process.name().to_string(),
        DecodeMode::Clone => String::new(),
    };

    Ok(Header {
        name,
        cluster: primary.name,
        validity,
        frequency,
        retry,
        acl,
        tags: decode_user_tags(&process.tags()),
    })
}

fn import_optional(
    value: &str,
    timezone: &str,
) -> Result<Option<chrono::NaiveDateTime>, MappingError> {
    if value.is_empty() {
        return Ok(None);
    }
    import_instant(value, timezone).map(Some)
}

pub(crate) fn encode_header(
    process: &mut ProcessEntity,
    header: &HeaderRef<'_>,
) -> Result<(), MappingError> {
    if header.name.is_empty() {
        return Err(MappingError::missing("name"));
    }
    if header.cluster.is_empty() {
        return Err(MappingError::missing("clusters.cluster.name"));
    }
    let timezone = if header.validity.timezone.is_empty() {
        default_timezone()
    } else {
        header.validity.timezone.clone()
    };
    let start = header
        .validity
        .start
        .as_ref()
        .ok_or_else(|| MappingError::missing("validity.start"))?;
    let end = header
        .validity
        .end
        .as_ref()
        .ok_or_else(|| MappingError::missing("validity.end"))?;

    let cluster = ProcessCluster {
        name: header.cluster.to_string(),
        start: export_instant(start, &timezone)?,
        end: export_instant(end, &timezone)?,
    };

    let tags = merge_tags(&process.tags(), header.subtype, header.name, header.tags);

    process.set_name(header.name);
    process.set_tags(&tags);
    process.set_primary_cluster(&cluster);
    process.set_frequency(&header.frequency.encode());
    process.set_timezone(&timezone);
    process.set_retry(&RetrySpec {
        policy: header.retry.policy.clone(),
        delay: header.retry.delay.encode(),
        attempts: header.retry.attempts.to_string(),
    });
    process.set_acl(&AclSpec {
        owner: header.acl.owner.clone(),
        group: header.acl.group.clone(),
        permission: header.acl.permission.clone(),
    });
    Ok(())
}

/// Tag string for an encoded process.
///
/// When the base document's markers resolve to `subtype` the base layout is
/// kept: markers stay in place, user tags fill the base's user-tag positions
/// in order and any extra ones are appended. The extension job marker always
/// carries the job name. Markers that do not resolve to `subtype` are
/// replaced by the sub-type's own markers, followed by the user's tags.
pub(crate) fn merge_tags(base: &str, subtype: JobSubtype, name: &str, user: &[Tag]) -> String {
    let base_tags = decode_tags(base);
    let markers: Vec<Tag> = base_tags.iter().filter(|t| t.is_reserved()).cloned().collect();
    let mut user_tags = user.iter().filter(|t| !t.is_reserved()).cloned();

    if JobSubtype::resolve(&encode_tags(&markers), None) != Ok(subtype) {
        let mut merged = subtype.marker_tags(name);
        merged.extend(user_tags);
        return encode_tags(&merged);
    }

    let mut job_written = markers.iter().any(|t| t.key == EXTENSION_JOB_TAG);
    let mut merged = Vec::with_capacity(base_tags.len());
    for tag in base_tags {
        if !tag.is_reserved() {
            merged.extend(user_tags.next());
            continue;
        }
        let names_extension = tag.key == EXTENSION_NAME_TAG;
        if tag.key == EXTENSION_JOB_TAG {
            merged.push(Tag::new(EXTENSION_JOB_TAG, name));
        } else {
            merged.push(tag);
        }
        if names_extension && !job_written {
            merged.push(Tag::new(EXTENSION_JOB_TAG, name));
            job_written = true;
        }
    }
    merged.extend(user_tags);
    encode_tags(&merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER_XML: &str = r#"<process xmlns="uri:falcon:process:0.1" name="job-a"><tags>_falcon_mirroring_type=HDFS,owner=ops</tags><clusters><cluster name="primaryCluster"><validity start="2015-03-13T00:00Z" end="2016-12-30T00:00Z"/></cluster></clusters><frequency>hours(2)</frequency><timezone>GMT+05:30</timezone><retry policy="exp-backoff" delay="minutes(10)" attempts="4"/><ACL owner="hrt_qa" group="users" permission="0x755"/></process>"#;

    #[test]
    fn test_decode_header_edit() {
        let process = ProcessEntity::parse(HEADER_XML).unwrap();
        let header = decode_header(&process, DecodeMode::Edit).unwrap();

        assert_eq!(header.name, "job-a");
        assert_eq!(header.cluster, "primaryCluster");
        assert_eq!(header.frequency, Some(Frequency::hours(2)));
        assert_eq!(header.retry.policy, "exp-backoff");
        assert_eq!(header.retry.attempts, 4);
        assert_eq!(header.acl.owner, "hrt_qa");
        assert_eq!(header.tags, vec![Tag::new("owner", "ops")]);
        assert_eq!(header.validity.timezone, "GMT+05:30");
        assert_eq!(
            header.validity.start,
            NaiveDate::from_ymd_opt(2015, 3, 13).unwrap().and_hms_opt(5, 30, 0)
        );
    }

    #[test]
    fn test_decode_header_clone_clears_name() {
        let process = ProcessEntity::parse(HEADER_XML).unwrap();
        let header = decode_header(&process, DecodeMode::Clone).unwrap();
        assert!(header.name.is_empty());
    }

    #[test]
    fn test_decode_header_rejects_malformed_frequency() {
        let mut process = ProcessEntity::parse(HEADER_XML).unwrap();
        process.set_frequency("5 minutes");
        assert_eq!(
            decode_header(&process, DecodeMode::Edit).unwrap_err(),
            MappingError::MalformedDuration {
                value: "5 minutes".to_string()
            }
        );
    }

    #[test]
    fn test_run_on_prefers_target() {
        assert_eq!(run_on_for("c1", "c2"), RunOn::Source);
        assert_eq!(run_on_for("c2", "c2"), RunOn::Target);
        assert_eq!(run_on_for("", ""), RunOn::Source);
    }

    #[test]
    fn test_job_run_cluster_prefers_source() {
        assert_eq!(run_on_for_job_run("c1", "c1"), RunOn::Source);
        assert_eq!(run_on_for_job_run("c2", "c1"), RunOn::Target);
        assert_eq!(run_on_for_job_run("elsewhere", "c1"), RunOn::Target);
    }

    #[test]
    fn test_merge_tags_rewrites_job_marker() {
        let merged = merge_tags(
            "_falcon_extension_name=HDFS-SNAPSHOT-MIRRORING,_falcon_extension_job=old,team=a",
            JobSubtype::Snapshot,
            "new",
            &[Tag::new("team", "b")],
        );
        assert_eq!(
            merged,
            "_falcon_extension_name=HDFS-SNAPSHOT-MIRRORING,_falcon_extension_job=new,team=b"
        );
    }

    #[test]
    fn test_merge_tags_adds_missing_marker() {
        let merged = merge_tags("", JobSubtype::Hive, "job", &[Tag::new("k", "v")]);
        assert_eq!(merged, "_falcon_mirroring_type=HIVE,k=v");
    }

    #[test]
    fn test_merge_tags_names_extension_job() {
        let merged = merge_tags(
            "_falcon_extension_name=HDFS-SNAPSHOT-MIRRORING",
            JobSubtype::Snapshot,
            "snap",
            &[],
        );
        assert_eq!(
            merged,
            "_falcon_extension_name=HDFS-SNAPSHOT-MIRRORING,_falcon_extension_job=snap"
        );
    }

    #[test]
    fn test_merge_tags_keeps_marker_position() {
        let base = "owner=ops,_falcon_mirroring_type=HDFS,tier=gold";
        let user = decode_user_tags(base);
        assert_eq!(merge_tags(base, JobSubtype::Hdfs, "job", &user), base);

        let edited = vec![Tag::new("owner", "dr"), Tag::new("tier", "gold"), Tag::new("x", "y")];
        assert_eq!(
            merge_tags(base, JobSubtype::Hdfs, "job", &edited),
            "owner=dr,_falcon_mirroring_type=HDFS,tier=gold,x=y"
        );
        assert_eq!(
            merge_tags(base, JobSubtype::Hdfs, "job", &[Tag::new("owner", "ops")]),
            "owner=ops,_falcon_mirroring_type=HDFS"
        );
    }

    #[test]
    fn test_merge_tags_replaces_conflicting_marker() {
        let merged = merge_tags("_falcon_mirroring_type=HDFS", JobSubtype::Hive, "job", &[]);
        assert_eq!(merged, "_falcon_mirroring_type=HIVE");
    }

    #[test]
    fn test_encode_header_requires_validity() {
        let mut process = ProcessEntity::new("job");
        let validity = Validity {
            start: None,
            end: None,
            timezone: "UTC".to_string(),
        };
        let header = HeaderRef {
            subtype: JobSubtype::Hdfs,
            name: "job",
            cluster: "c1",
            validity: &validity,
            frequency: &Frequency::minutes(5),
            retry: &Retry::default(),
            acl: &Acl::default(),
            tags: &[],
        };
        assert_eq!(
            encode_header(&mut process, &header),
            Err(MappingError::missing("validity.start"))
        );
    }
}
