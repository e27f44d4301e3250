// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use super::*;

impl<T: Transport, P: Lwm2mParams> Lwm2mClient<T, P> {
    /// Requests bootstrap from the bootstrap server at `remote`.
    ///
    /// Sends a POST to `/bs` with the endpoint name as a Uri-Query option. The server
    /// answers and then writes the Security and Server objects, which arrive as requests
    /// for [`Lwm2mService::dispatch`].
    pub fn bootstrap(&self, remote: &T::SocketAddr, endpoint: &str) -> Result<(), Error> {
        let ep = format!("ep={}", endpoint);

        let mut msg = self.new_request(MsgCode::MethodPost, NotificationKind::Bootstrap);
        msg.append_option_with_str(OptionNumber::URI_PATH, LWM2M_BOOTSTRAP_URI_PATH)?;
        msg.append_option_with_str(OptionNumber::URI_QUERY, &ep)?;

        info!("bootstrap {} with {:?}", endpoint, remote);
        self.send_request(&msg, NotificationKind::Bootstrap, remote)
    }
}
