// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use kwacha::cli;
use kwacha::commands::profile::initials;

#[test]
fn initials_use_first_two_words() {
    assert_eq!(initials("Mwape Katongo"), "MK");
    assert_eq!(initials("Mwape"), "M");
    assert_eq!(initials("Mwape Chanda Katongo"), "MC");
    assert_eq!(initials("  "), "");
}

#[test]
fn profile_set_accepts_name_and_salary() {
    let matches = cli::build_cli().get_matches_from([
        "kwacha", "profile", "set", "--name", "Mwape Katongo", "--salary", "12000",
    ]);
    let (_, profile_m) = matches.subcommand().unwrap();
    let (name, set_m) = profile_m.subcommand().unwrap();
    assert_eq!(name, "set");
    assert_eq!(set_m.get_one::<String>("name").unwrap(), "Mwape Katongo");
    assert_eq!(set_m.get_one::<String>("salary").unwrap(), "12000");
}
