// Provide a mapping for the controller GPIO pins

//
//| GPIO # | Name        | Description                                                        |
//| ------ | ----------- | ------------------------------------------------------------------ |
//| 2      | BTN         | Input from the physical power button. Active low, internal pull-up.|
//| 3      | SYS_REQ     | Power request from the system. Active high, external pull-down.    |
//| 4      | PWR_CUT     | Battery switch control. High cuts system power.                    |
//| 5      | SYS_BTN     | Button echo to the system. Open drain, pull-up on the system side. |

use assign_resources::assign_resources;
use embassy_rp::Peri;
use embassy_rp::peripherals;

assign_resources! {
  /// Power button and system request inputs
  inputs: InputResources {
    button: PIN_2,
    request: PIN_3,
  },
  outputs: OutputResources {
    power_switch: PIN_4,
    echo: PIN_5,
  },
  watchdog: WatchdogResources {
    watchdog: WATCHDOG,
  },
}
