//! Builders for UI models used by the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use falcon_mirror::model::{
    DatasetUiModel, HiveDatabaseType, MirrorType, RunOn, SnapshotUiModel, UiModel,
};
use falcon_mirror::{Frequency, LocationKind, Tag};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Builder for HDFS and HIVE mirroring models.
pub struct DatasetBuilder {
    ui: DatasetUiModel,
}

impl DatasetBuilder {
    /// HDFS job from primaryCluster to backupCluster.
    pub fn hdfs(name: &str) -> Self {
        let mut ui = DatasetUiModel::new(MirrorType::Hdfs);
        ui.name = name.to_string();
        ui.source.cluster = "primaryCluster".to_string();
        ui.source.url = "hdfs://nn1:8020".to_string();
        ui.source.path = "/data/in".to_string();
        ui.target.cluster = "backupCluster".to_string();
        ui.target.url = "hdfs://nn2:8020".to_string();
        ui.target.path = "/data/out".to_string();
        ui.acl.owner = "hrt_qa".to_string();
        Self { ui }.validity(at(2016, 4, 1, 0), at(2017, 4, 1, 0))
    }

    /// HIVE job replicating one table from primaryCluster to backupCluster.
    pub fn hive(name: &str) -> Self {
        let mut ui = DatasetUiModel::new(MirrorType::Hive);
        ui.name = name.to_string();
        ui.source.cluster = "primaryCluster".to_string();
        ui.source.hive_metastore_uri = "thrift://meta1:9083".to_string();
        ui.target.cluster = "backupCluster".to_string();
        ui.target.hive_metastore_uri = "thrift://meta2:9083".to_string();
        ui.hive_options.source.staging_path = "/apps/falcon/primaryCluster/staging".to_string();
        ui.hive_options.source.hive_server2_endpoint = "hive2://meta1:10000".to_string();
        ui.hive_options.target.staging_path = "/apps/falcon/backupCluster/staging".to_string();
        ui.hive_options.target.hive_server2_endpoint = "hive2://meta2:10000".to_string();
        ui.source.hive_database_type = HiveDatabaseType::Tables;
        ui.source.hive_database = "sales".to_string();
        ui.source.hive_tables = "orders".to_string();
        ui.acl.owner = "hrt_qa".to_string();
        Self { ui }.validity(at(2016, 4, 1, 0), at(2017, 4, 1, 0))
    }

    pub fn run_on(mut self, run_on: RunOn) -> Self {
        self.ui.run_on = run_on;
        self
    }

    pub fn validity(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.ui.validity.start = Some(start);
        self.ui.validity.end = Some(end);
        self
    }

    pub fn timezone(mut self, timezone: &str) -> Self {
        self.ui.validity.timezone = timezone.to_string();
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.ui.frequency = frequency;
        self
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.ui.tags.push(Tag::new(key, value));
        self
    }

    pub fn alert(mut self, receiver: &str) -> Self {
        self.ui.alerts.push(receiver.to_string());
        self
    }

    /// Replaces the source with a cloud URL; the job then runs on the target.
    pub fn cloud_source(mut self, url: &str) -> Self {
        self.ui.source.url = url.to_string();
        self.ui.source.cluster = String::new();
        self.ui.source.location = LocationKind::classify(url);
        self.ui.normalize_locations();
        self
    }

    /// Switches a HIVE job to whole-database replication.
    pub fn databases(mut self, databases: &str) -> Self {
        let source = &mut self.ui.source;
        source.hive_database_type = HiveDatabaseType::Databases;
        source.hive_databases = databases.to_string();
        source.hive_database = String::new();
        source.hive_tables = "*".to_string();
        self
    }

    pub fn without_hive_endpoints(mut self) -> Self {
        self.ui.hive_options.source.staging_path.clear();
        self.ui.hive_options.source.hive_server2_endpoint.clear();
        self.ui.hive_options.target.staging_path.clear();
        self.ui.hive_options.target.hive_server2_endpoint.clear();
        self
    }

    pub fn build(self) -> DatasetUiModel {
        self.ui
    }

    pub fn into_ui(self) -> UiModel {
        UiModel::Dataset(self.ui)
    }
}

/// Builder for snapshot replication models.
pub struct SnapshotBuilder {
    ui: SnapshotUiModel,
}

impl SnapshotBuilder {
    pub fn new(name: &str) -> Self {
        let mut ui = SnapshotUiModel {
            name: name.to_string(),
            ..SnapshotUiModel::default()
        };
        ui.source.cluster = "primaryCluster".to_string();
        ui.source.directory_path = "/apps/warehouse".to_string();
        ui.target.cluster = "backupCluster".to_string();
        ui.target.directory_path = "/apps/warehouse-copy".to_string();
        ui.validity.start = Some(at(2016, 4, 1, 0));
        ui.validity.end = Some(at(2017, 4, 1, 0));
        ui.acl.owner = "hrt_qa".to_string();
        Self { ui }
    }

    pub fn run_on(mut self, run_on: RunOn) -> Self {
        self.ui.run_on = run_on;
        self
    }

    pub fn retention(mut self, number: u32, age_limit: Frequency) -> Self {
        self.ui.target.retention_number = number;
        self.ui.target.delete_frequency = age_limit;
        self
    }

    pub fn max_maps(mut self, max_maps: u32) -> Self {
        self.ui.allocation.distcp_max_maps = Some(max_maps);
        self
    }

    pub fn alert(mut self, receiver: &str) -> Self {
        self.ui.alerts.push(receiver.to_string());
        self
    }

    pub fn build(self) -> SnapshotUiModel {
        self.ui
    }

    pub fn into_ui(self) -> UiModel {
        UiModel::Snapshot(self.ui)
    }
}
