//! Snapshots of unspent CER feed datums captured on 2024-08-09.

use pubwatch_core::OnChainRecord;

fn rec(feed_id: &str, timestamp_ms: i64, amount: i128, denominator: i128) -> OnChainRecord {
    OnChainRecord::new(feed_id, timestamp_ms, amount, denominator)
}

/// Four hourly publication rounds ending 07:00 UTC, plus late stragglers.
pub fn snapshot_0700() -> Vec<OnChainRecord> {
    vec![
        rec("CER/iBTC-ADA/3", 1_723_186_803_981, 79234635919, 500000),
        rec("CER/iETH-ADA/3", 1_723_186_803_981, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_186_803_981, 42663, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_186_803_981, 591, 250000),
        rec("CER/SHEN-ADA/3", 1_723_186_803_981, 1025151, 1000000),
        rec("CER/ADA-EUR/3", 1_723_186_803_981, 3989, 12500),
        rec("CER/FACT-ADA/3", 1_723_186_803_981, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_186_803_981, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_186_803_981, 295473, 500000),
        rec("CER/LENFI-ADA/3", 1_723_186_803_981, 1710537, 1000000),
        rec("CER/NEWM-ADA/3", 1_723_186_803_981, 129, 20000),
        rec("CER/ADA-DJED/3", 1_723_186_803_981, 21647, 62500),
        rec("CER/ADA-iUSD/3", 1_723_186_803_981, 410779, 1000000),
        rec("CER/ADA-USDM/3", 1_723_186_803_981, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_186_803_981, 305973, 1000000),
        rec("CER/ADA-USD/3", 1_723_186_803_981, 697, 2000),
        rec("CER/iBTC-ADA/3", 1_723_183_204_018, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_183_204_006, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_183_203_988, 42663, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_183_203_976, 47, 20000),
        rec("CER/SHEN-ADA/3", 1_723_183_204_006, 1025151, 1000000),
        rec("CER/ADA-EUR/3", 1_723_183_203_980, 159523, 500000),
        rec("CER/FACT-ADA/3", 1_723_183_203_958, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_183_203_944, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_183_203_935, 29519, 50000),
        rec("CER/LENFI-ADA/3", 1_723_183_203_913, 850833, 500000),
        rec("CER/NEWM-ADA/3", 1_723_183_203_896, 6449, 1000000),
        rec("CER/ADA-DJED/3", 1_723_183_203_891, 21647, 62500),
        rec("CER/ADA-iUSD/3", 1_723_183_203_927, 25629, 62500),
        rec("CER/ADA-USDM/3", 1_723_183_203_877, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_183_203_898, 305973, 1000000),
        rec("CER/ADA-USD/3", 1_723_183_203_849, 871, 2500),
        rec("CER/iBTC-ADA/3", 1_723_179_603_485, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_179_603_464, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_179_603_451, 42643, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_179_603_437, 2343, 1000000),
        rec("CER/SHEN-ADA/3", 1_723_179_603_402, 102557, 100000),
        rec("CER/ADA-EUR/3", 1_723_179_603_372, 317297, 1000000),
        rec("CER/FACT-ADA/3", 1_723_179_603_350, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_179_603_328, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_179_603_276, 294989, 500000),
        rec("CER/LENFI-ADA/3", 1_723_179_603_538, 340759, 200000),
        rec("CER/NEWM-ADA/3", 1_723_179_603_250, 6449, 1000000),
        rec("CER/ADA-DJED/3", 1_723_179_603_529, 173497, 500000),
        rec("CER/ADA-iUSD/3", 1_723_179_603_166, 410443, 1000000),
        rec("CER/ADA-USDM/3", 1_723_179_603_403, 172353, 500000),
        rec("CER/HUNT-ADA/3", 1_723_179_603_108, 152993, 500000),
        rec("CER/ADA-USD/3", 1_723_179_603_040, 1729, 5000),
        rec("CER/ADA-USD/3", 1_723_178_541_176, 17427, 50000),
        rec("CER/ADA-DJED/3", 1_723_176_183_087, 350251, 1000000),
        rec("CER/iBTC-ADA/3", 1_723_176_003_320, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_176_003_312, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_176_003_304, 5349, 125000),
        rec("CER/SNEK-ADA/3", 1_723_176_003_288, 1159, 500000),
        rec("CER/SHEN-ADA/3", 1_723_176_003_270, 102557, 100000),
        rec("CER/ADA-EUR/3", 1_723_176_003_254, 322393, 1000000),
        rec("CER/FACT-ADA/3", 1_723_176_003_236, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_176_003_222, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_176_003_210, 294703, 500000),
        rec("CER/LENFI-ADA/3", 1_723_176_003_189, 1702987, 1000000),
        rec("CER/NEWM-ADA/3", 1_723_176_003_169, 1313, 200000),
        rec("CER/ADA-iUSD/3", 1_723_176_003_276, 102669, 250000),
        rec("CER/ADA-USDM/3", 1_723_176_003_283, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_176_003_146, 305979, 1000000),
        rec("CER/ADA-USD/3", 1_723_176_003_159, 70427, 200000),
        rec("CER/ADA-iUSD/3", 1_723_173_062_939, 102779, 250000),
    ]
}

/// Six hourly publication rounds ending 09:00 UTC.
pub fn snapshot_0900() -> Vec<OnChainRecord> {
    vec![
        rec("CER/ADA-DJED/3", 1_723_194_014_750, 345233, 1000000),
        rec("CER/iBTC-ADA/3", 1_723_194_003_299, 157397269397, 1000000),
        rec("CER/iETH-ADA/3", 1_723_194_003_307, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_194_003_260, 42663, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_194_003_208, 1177, 500000),
        rec("CER/SHEN-ADA/3", 1_723_194_003_171, 256647, 250000),
        rec("CER/ADA-EUR/3", 1_723_194_003_160, 3183, 10000),
        rec("CER/FACT-ADA/3", 1_723_194_003_107, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_194_003_102, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_194_003_056, 296561, 500000),
        rec("CER/LENFI-ADA/3", 1_723_194_003_038, 860993, 500000),
        rec("CER/NEWM-ADA/3", 1_723_194_003_026, 129, 20000),
        rec("CER/ADA-iUSD/3", 1_723_194_003_208, 41147, 100000),
        rec("CER/ADA-USDM/3", 1_723_194_003_258, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_194_003_004, 38029, 125000),
        rec("CER/ADA-USD/3", 1_723_194_002_979, 86801, 250000),
        rec("CER/iBTC-ADA/3", 1_723_190_404_677, 79234635919, 500000),
        rec("CER/iETH-ADA/3", 1_723_190_404_705, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_190_404_689, 21391, 500000),
        rec("CER/SNEK-ADA/3", 1_723_190_403_523, 2351, 1000000),
        rec("CER/SHEN-ADA/3", 1_723_190_403_515, 1025151, 1000000),
        rec("CER/ADA-EUR/3", 1_723_190_404_692, 318449, 1000000),
        rec("CER/FACT-ADA/3", 1_723_190_403_496, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_190_403_467, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_190_403_496, 593227, 1000000),
        rec("CER/LENFI-ADA/3", 1_723_190_403_456, 1725647, 1000000),
        rec("CER/NEWM-ADA/3", 1_723_190_403_447, 129, 20000),
        rec("CER/ADA-DJED/3", 1_723_190_403_424, 21647, 62500),
        rec("CER/ADA-iUSD/3", 1_723_190_403_411, 8227, 20000),
        rec("CER/ADA-USDM/3", 1_723_190_403_406, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_190_403_429, 38029, 125000),
        rec("CER/ADA-USD/3", 1_723_190_403_402, 3477, 10000),
        rec("CER/iBTC-ADA/3", 1_723_186_803_981, 79234635919, 500000),
        rec("CER/iETH-ADA/3", 1_723_186_803_905, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_186_803_890, 42663, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_186_803_859, 591, 250000),
        rec("CER/SHEN-ADA/3", 1_723_186_803_851, 1025151, 1000000),
        rec("CER/ADA-EUR/3", 1_723_186_804_195, 3989, 12500),
        rec("CER/FACT-ADA/3", 1_723_186_803_803, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_186_803_733, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_186_803_662, 295473, 500000),
        rec("CER/LENFI-ADA/3", 1_723_186_803_833, 1710537, 1000000),
        rec("CER/NEWM-ADA/3", 1_723_186_803_633, 129, 20000),
        rec("CER/ADA-DJED/3", 1_723_186_803_598, 21647, 62500),
        rec("CER/ADA-iUSD/3", 1_723_186_803_575, 410779, 1000000),
        rec("CER/ADA-USDM/3", 1_723_186_803_551, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_186_803_837, 305973, 1000000),
        rec("CER/ADA-USD/3", 1_723_186_803_519, 697, 2000),
        rec("CER/iBTC-ADA/3", 1_723_183_204_018, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_183_204_006, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_183_203_988, 42663, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_183_203_976, 47, 20000),
        rec("CER/SHEN-ADA/3", 1_723_183_204_006, 1025151, 1000000),
        rec("CER/ADA-EUR/3", 1_723_183_203_980, 159523, 500000),
        rec("CER/FACT-ADA/3", 1_723_183_203_958, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_183_203_944, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_183_203_935, 29519, 50000),
        rec("CER/LENFI-ADA/3", 1_723_183_203_913, 850833, 500000),
        rec("CER/NEWM-ADA/3", 1_723_183_203_896, 6449, 1000000),
        rec("CER/ADA-DJED/3", 1_723_183_203_891, 21647, 62500),
        rec("CER/ADA-iUSD/3", 1_723_183_203_927, 25629, 62500),
        rec("CER/ADA-USDM/3", 1_723_183_203_877, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_183_203_898, 305973, 1000000),
        rec("CER/ADA-USD/3", 1_723_183_203_849, 871, 2500),
        rec("CER/iBTC-ADA/3", 1_723_179_603_485, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_179_603_464, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_179_603_451, 42643, 1000000),
        rec("CER/SNEK-ADA/3", 1_723_179_603_437, 2343, 1000000),
        rec("CER/SHEN-ADA/3", 1_723_179_603_402, 102557, 100000),
        rec("CER/ADA-EUR/3", 1_723_179_603_372, 317297, 1000000),
        rec("CER/FACT-ADA/3", 1_723_179_603_350, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_179_603_328, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_179_603_276, 294989, 500000),
        rec("CER/LENFI-ADA/3", 1_723_179_603_538, 340759, 200000),
        rec("CER/NEWM-ADA/3", 1_723_179_603_250, 6449, 1000000),
        rec("CER/ADA-DJED/3", 1_723_179_603_529, 173497, 500000),
        rec("CER/ADA-iUSD/3", 1_723_179_603_166, 410443, 1000000),
        rec("CER/ADA-USDM/3", 1_723_179_603_403, 172353, 500000),
        rec("CER/HUNT-ADA/3", 1_723_179_603_108, 152993, 500000),
        rec("CER/ADA-USD/3", 1_723_179_603_040, 1729, 5000),
        rec("CER/ADA-USD/3", 1_723_178_541_176, 17427, 50000),
        rec("CER/ADA-DJED/3", 1_723_176_183_087, 350251, 1000000),
        rec("CER/iBTC-ADA/3", 1_723_176_003_320, 9913737553, 62500),
        rec("CER/iETH-ADA/3", 1_723_176_003_312, 3526254483, 500000),
        rec("CER/MIN-ADA/3", 1_723_176_003_304, 5349, 125000),
        rec("CER/SNEK-ADA/3", 1_723_176_003_288, 1159, 500000),
        rec("CER/SHEN-ADA/3", 1_723_176_003_270, 102557, 100000),
        rec("CER/ADA-EUR/3", 1_723_176_003_254, 322393, 1000000),
        rec("CER/FACT-ADA/3", 1_723_176_003_236, 5183, 200000),
        rec("CER/LQ-ADA/3", 1_723_176_003_222, 108147, 50000),
        rec("CER/WMT-ADA/3", 1_723_176_003_210, 294703, 500000),
        rec("CER/LENFI-ADA/3", 1_723_176_003_189, 1702987, 1000000),
        rec("CER/NEWM-ADA/3", 1_723_176_003_169, 1313, 200000),
        rec("CER/ADA-iUSD/3", 1_723_176_003_276, 102669, 250000),
        rec("CER/ADA-USDM/3", 1_723_176_003_283, 346269, 1000000),
        rec("CER/HUNT-ADA/3", 1_723_176_003_146, 305979, 1000000),
        rec("CER/ADA-USD/3", 1_723_176_003_159, 70427, 200000),
        rec("CER/ADA-iUSD/3", 1_723_173_062_939, 102779, 250000),
    ]
}
