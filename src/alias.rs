use std::collections::HashMap;
use std::sync::OnceLock;

use crate::table::{Cell, Table};

/// Canonical Cost Explorer service names and the short names people use for them.
const SERVICE_ALIASES: &[(&str, &[&str])] = &[
    ("Amazon Athena", &["Athena"]),
    ("Amazon CloudFront", &["CloudFront"]),
    ("Amazon DynamoDB", &["DynamoDB"]),
    (
        "Amazon EC2 Container Registry (ECR)",
        &["ECR", "EC2 Container Registry"],
    ),
    (
        "Amazon Elastic Compute Cloud - Compute",
        &["EC2", "EC2-Instances", "Elastic Compute Cloud - Compute"],
    ),
    (
        "Amazon Elastic Container Service",
        &["ECS", "Elastic Container Service"],
    ),
    ("Amazon Elastic File System", &["EFS", "Elastic File System"]),
    (
        "Amazon Elastic Load Balancing",
        &["ELB", "EC2-ELB", "Elastic Load Balancing"],
    ),
    ("Amazon Elastic MapReduce", &["EMR", "Elastic MapReduce"]),
    ("Amazon ElastiCache", &["ElastiCache"]),
    (
        "Amazon Elasticsearch Service",
        &["ES", "Amazon ES", "Elasticsearch Service"],
    ),
    ("Amazon GuardDuty", &["GuardDuty"]),
    ("Amazon Kinesis", &["Kinesis"]),
    (
        "Amazon Managed Streaming for Apache Kafka",
        &["MSK", "Amazon MSK", "Managed Streaming for Apache Kafka"],
    ),
    ("Amazon Redshift", &["Redshift"]),
    (
        "Amazon Relational Database Service",
        &["RDS", "Relational Database Service"],
    ),
    ("Amazon Route 53", &["Route 53"]),
    ("Amazon SageMaker", &["SageMaker"]),
    (
        "Amazon Simple Notification Service",
        &["SNS", "Simple Notification Service"],
    ),
    ("Amazon Simple Queue Service", &["SQS", "Simple Queue Services"]),
    ("Amazon Simple Storage Service", &["S3", "Simple Storage Service"]),
    ("AmazonCloudWatch", &["CloudWatch"]),
    ("AWS Budgets", &["Budgets"]),
    ("AWS CloudTrail", &["CloudTrail"]),
    ("AWS Config", &["Config"]),
    ("AWS Cost Explorer", &["Cost Explorer"]),
    ("AWS Data Transfer", &["Data Transfer"]),
    ("AWS Elemental MediaStore", &["Elemental MediaStore"]),
    ("AWS Glue", &["Glue"]),
    ("AWS Key Management Service", &["KMS", "Key Management Service"]),
    ("AWS Lambda", &["Lambda"]),
    ("AWS Secrets Manager", &["Secrets Manager"]),
    ("AWS Security Hub", &["Security Hub"]),
    ("AWS Service Catalog", &["Service Catalog"]),
    ("AWS Step Functions", &["Step Functions"]),
    ("EC2 - Other", &["EC2-Other"]),
];

/// Lookup from service aliases to canonical names.
///
/// The reverse index is built on the first `resolve` call and reused after
/// that. Create one and pass it by reference wherever names need resolving.
pub struct ServiceAliases {
    source: &'static [(&'static str, &'static [&'static str])],
    index: OnceLock<HashMap<&'static str, &'static str>>,
}

impl Default for ServiceAliases {
    fn default() -> Self {
        Self::from_table(SERVICE_ALIASES)
    }
}

impl ServiceAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(source: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self {
            source,
            index: OnceLock::new(),
        }
    }

    fn index(&self) -> &HashMap<&'static str, &'static str> {
        self.index.get_or_init(|| {
            let mut index = HashMap::new();
            for (canonical, aliases) in self.source {
                for alias in *aliases {
                    index.insert(*alias, *canonical);
                }
            }
            tracing::debug!(aliases = index.len(), "built service alias index");
            index
        })
    }

    /// Canonical name for `name`, or `name` itself if it is not a known alias.
    pub fn resolve<'a>(&self, name: &'a str) -> &'a str {
        self.index().get(name).copied().unwrap_or(name)
    }

    /// `(canonical, comma-joined aliases)` pairs in table order.
    pub fn list(&self) -> Vec<(String, String)> {
        self.source
            .iter()
            .map(|(canonical, aliases)| (canonical.to_string(), aliases.join(",")))
            .collect()
    }

    /// The alias table as `service_name`/`aliases` rows.
    pub fn list_aliases(&self) -> Table {
        let mut table = Table::new(["service_name", "aliases"]);
        for (canonical, aliases) in self.list() {
            table.push_row(vec![Cell::Text(canonical), Cell::Text(aliases)]);
        }
        table
    }
}
