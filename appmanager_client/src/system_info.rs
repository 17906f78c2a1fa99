use ::appmanager_common::{error::Result, resource::SystemInformation};
use ::reqwest::Method;

use crate::client::AppManagerClient;

impl AppManagerClient {
    pub async fn get_system_info(&self) -> Result<SystemInformation> {
        let url = self.system_info_url();
        self.send_json(self.request(Method::GET, &url)).await
    }
}
