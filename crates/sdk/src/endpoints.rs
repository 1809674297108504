//! Well-known management endpoints per cloud environment.

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = PUBLIC_MANAGEMENT_ENDPOINT;

pub const PUBLIC_MANAGEMENT_ENDPOINT: &str = "management.azure.com";
pub const CHINA_MANAGEMENT_ENDPOINT: &str = "management.chinacloudapi.cn";
pub const GERMANY_MANAGEMENT_ENDPOINT: &str = "management.microsoftazure.de";
pub const US_GOVERNMENT_MANAGEMENT_ENDPOINT: &str = "management.usgovcloudapi.net";
