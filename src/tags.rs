//! Static tag catalog for the FFD document format.
//!
//! Tags 1..=99 are top-level document kinds, tags 1001..=1226 are leaf and
//! sub-container fields. Descriptions are the normative Russian field names
//! and are unique across the catalog; English names are the JSON keys and
//! are deliberately NOT unique — aliased names (`taxationType`,
//! `operatorInn`, the sum counters) are told apart by their parent tag.

use crate::registry::{Kind, TagEntry};

const fn t(tag: u16, kind: Kind, name: Option<&'static str>, description: &'static str, maxlen: u32) -> TagEntry {
    TagEntry::new(tag, kind, name, description, maxlen)
}

pub(crate) static CATALOG: &[TagEntry] = &[
    // Document kinds.
    t(1, Kind::Stlv, Some("fiscalReport"), "отчёт о регистрации", 658).one(),
    t(2, Kind::Stlv, Some("openShift"), "отчёт об открытии смены", 440).one(),
    t(3, Kind::Stlv, Some("receipt"), "кассовый чек", 32767).one(),
    t(4, Kind::Stlv, Some("bso"), "бланк строгой отчетности", 32767).one(),
    t(5, Kind::Stlv, Some("closeShift"), "отчёт о закрытии смены", 440).one(),
    t(6, Kind::Stlv, Some("closeArchive"), "отчёт о закрытии фискального накопителя", 440).one(),
    t(7, Kind::Stlv, Some("operatorAck"), "подтверждение оператора", 512).one(),
    t(11, Kind::Stlv, Some("fiscalReportCorrection"), "отчёт об изменении параметров регистрации", 658).one(),
    t(21, Kind::Stlv, Some("currentStateReport"), "отчёт о текущем состоянии расчетов", 440).one(),
    t(31, Kind::Stlv, Some("receiptCorrection"), "кассовый чек коррекции", 32767).one(),
    t(41, Kind::Stlv, Some("bsoCorrection"), "бланк строгой отчетности коррекции", 32767).one(),
    // Leaf and sub-container fields.
    t(1001, Kind::Byte, Some("autoMode"), "признак автоматического режима", 1),
    t(1002, Kind::Byte, Some("offlineMode"), "признак автономного режима", 1),
    t(1003, Kind::String, Some("bankAgentAddress"), "адрес банковского агента", 256),
    t(1004, Kind::String, Some("bankSubagentAddress"), "адрес банковского субагента", 256),
    t(1005, Kind::String, Some("paymentAgentAddress"), "адрес платежного агента", 256),
    t(1006, Kind::String, Some("paymentSubagentAddress"), "адрес платежного субагента", 256),
    t(1008, Kind::String, Some("buyerAddress"), "телефон или электронный адрес покупателя", 64),
    t(1009, Kind::String, Some("retailPlaceAddress"), "адрес расчетов", 256),
    t(1010, Kind::Vln, Some("bankAgentRemuneration"), "размер вознаграждения банковского агента", 8),
    t(1011, Kind::Vln, Some("paymentAgentRemuneration"), "размер вознаграждения платежного агента", 8),
    t(1012, Kind::UnixTime, Some("dateTime"), "дата, время", 4),
    t(1013, Kind::String, Some("kktNumber"), "заводской номер ККТ", 20),
    t(1015, Kind::U32, None, "значение типа целое", 4).under(&[1047]),
    t(1016, Kind::String, Some("operatorInn"), "ИНН оператора перевода", 12).under(&[1223]),
    t(1017, Kind::String, Some("ofdInn"), "ИНН ОФД", 12),
    t(1018, Kind::String, Some("userInn"), "ИНН пользователя", 12),
    t(1020, Kind::Vln, Some("totalSum"), "ИТОГ", 6).under(&[3, 4, 31, 41]),
    t(1021, Kind::String, Some("operator"), "кассир", 64),
    t(1022, Kind::Byte, Some("ofdResponseCode"), "код ответа ОФД", 1).under(&[1068]),
    t(1023, Kind::Fvln, Some("quantity"), "количество", 8),
    t(1026, Kind::String, Some("operatorTransferName"), "наименование оператора перевода", 64),
    t(1030, Kind::String, Some("name"), "наименование предмета расчета", 128),
    t(1031, Kind::Vln, Some("cashTotalSum"), "сумма по чеку наличными", 6).under(&[3, 4, 31, 41]),
    t(1036, Kind::String, Some("machineNumber"), "номер автомата", 20),
    t(1037, Kind::String, Some("kktRegId"), "регистрационный номер ККТ", 20),
    t(1038, Kind::U32, Some("shiftNumber"), "номер смены", 4),
    t(1040, Kind::U32, Some("fiscalDocumentNumber"), "порядковый номер фискального документа", 4),
    t(1041, Kind::String, Some("fiscalDriveNumber"), "заводской номер фискального накопителя", 16),
    t(1042, Kind::U32, Some("requestNumber"), "номер чека за смену", 4),
    t(1043, Kind::Vln, Some("sum"), "стоимость предмета расчета", 6),
    t(1044, Kind::String, Some("bankAgentOperation"), "операция банковского агента", 24),
    t(1045, Kind::String, Some("bankSubagentOperation"), "операция банковского субагента", 24),
    t(1046, Kind::String, Some("ofdName"), "наименование ОФД", 256),
    t(1047, Kind::Stlv, None, "параметр настройки", 1024).many(),
    t(1048, Kind::String, Some("user"), "наименование пользователя", 256),
    t(1049, Kind::String, None, "почтовый индекс", 16),
    t(1050, Kind::Byte, Some("fiscalDriveExhaustionSign"), "признак исчерпания ресурса ФН", 1),
    t(1051, Kind::Byte, Some("fiscalDriveReplaceRequiredSign"), "признак необходимости срочной замены ФН", 1),
    t(1052, Kind::Byte, Some("fiscalDriveMemoryExceededSign"), "признак заполнения памяти ФН", 1),
    t(1053, Kind::Byte, Some("ofdResponseTimeoutSign"), "признак превышения времени ожидания ответа ОФД", 1),
    t(1054, Kind::Byte, Some("operationType"), "признак расчета", 1),
    t(1055, Kind::Byte, Some("taxationType"), "применяемая система налогообложения", 1).under(&[3, 4, 31, 41]),
    t(1056, Kind::Byte, Some("encryptionSign"), "признак шифрования", 1),
    t(1057, Kind::Byte, Some("paymentAgentType"), "признак агента", 1),
    t(1058, Kind::Byte, Some("bankAgentSign"), "применение банковскими агентами", 1),
    t(1059, Kind::Stlv, Some("items"), "предмет расчета", 1024).at_least_one(),
    t(1060, Kind::String, Some("fnsUrl"), "адрес сайта ФНС", 256),
    t(1061, Kind::String, Some("ofdUrl"), "адрес сайта ОФД", 256),
    t(1062, Kind::Byte, Some("taxationType"), "системы налогообложения", 1).under(&[1, 11]),
    t(1068, Kind::Stlv, Some("messageToFn"), "сообщение оператора для ФН", 1024).under(&[7]),
    t(1069, Kind::Stlv, Some("message"), "сообщение оператору", 1024).many(),
    t(1071, Kind::Stlv, Some("stornoItems"), "сторно предмета расчета", 1024).many(),
    t(1073, Kind::String, Some("paymentAgentPhone"), "телефон платежного агента", 19),
    t(1074, Kind::String, Some("paymentOperatorPhone"), "телефон оператора по приему платежей", 19),
    t(1075, Kind::String, Some("operatorTransferPhone"), "телефон оператора перевода", 19),
    t(1077, Kind::Bytes, Some("fiscalSign"), "фискальный признак документа", 6),
    t(1078, Kind::Bytes, Some("operatorFiscalSign"), "фискальный признак оператора", 18),
    t(1079, Kind::Vln, Some("price"), "цена за единицу предмета расчета", 6),
    t(1080, Kind::String, Some("barcode"), "штриховой код EAN", 16),
    t(1081, Kind::Vln, Some("ecashTotalSum"), "сумма по чеку электронными", 6).under(&[3, 4, 31, 41]),
    t(1082, Kind::String, Some("bankSubagentPhone"), "телефон банковского субагента", 19),
    t(1084, Kind::Stlv, Some("properties"), "дополнительный реквизит пользователя", 1024).many(),
    t(1085, Kind::String, Some("propertyName"), "наименование дополнительного реквизита", 64).under(&[1084]),
    t(1086, Kind::String, Some("propertyValue"), "значение дополнительного реквизита", 256).under(&[1084]),
    t(1097, Kind::U32, Some("notTransmittedDocumentsQuantity"), "количество непереданных документов ФД", 4),
    t(1098, Kind::UnixTime, Some("notTransmittedDocumentsDateTime"), "дата и время первого из непереданных ФД", 4),
    t(1101, Kind::Byte, Some("reregistrationReasonCode"), "код причины перерегистрации", 1),
    t(1102, Kind::Vln, Some("nds18"), "сумма НДС чека по ставке 18%", 6),
    t(1103, Kind::Vln, Some("nds10"), "сумма НДС чека по ставке 10%", 6),
    t(1104, Kind::Vln, Some("nds0"), "сумма расчета по чеку с НДС по ставке 0%", 6),
    t(1105, Kind::Vln, Some("ndsNo"), "сумма расчета по чеку без НДС", 6),
    t(1106, Kind::Vln, Some("nds18118"), "сумма НДС чека по расчетной ставке 18/118", 6),
    t(1107, Kind::Vln, Some("nds10110"), "сумма НДС чека по расчетной ставке 10/110", 6),
    t(1108, Kind::Byte, Some("internetSign"), "признак расчетов в сети Интернет", 1),
    t(1109, Kind::Byte, Some("serviceSign"), "признак работы в сфере услуг", 1),
    t(1110, Kind::Byte, Some("bsoSign"), "применяется для формирования БСО", 1),
    t(1111, Kind::U32, Some("documentsQuantity"), "общее количество ФД за смену", 4),
    t(1112, Kind::Stlv, Some("modifiers"), "скидка/наценка", 160).many(),
    t(1113, Kind::String, Some("discountName"), "наименование скидки", 64).under(&[1112]),
    t(1114, Kind::String, Some("markupName"), "наименование наценки", 64).under(&[1112]),
    t(1116, Kind::U32, Some("notTransmittedDocumentNumber"), "номер первого непереданного документа", 4),
    t(1117, Kind::String, Some("senderAddress"), "адрес электронной почты отправителя чека", 64),
    t(1118, Kind::U32, Some("receiptsQuantity"), "количество кассовых чеков за смену", 4),
    t(1126, Kind::Byte, Some("lotterySign"), "признак проведения лотереи", 1),
    t(1129, Kind::Stlv, Some("sellTotals"), "счетчики операций «приход»", 512).under(&[1157, 1194]),
    t(1130, Kind::Stlv, Some("sellReturnTotals"), "счетчики операций «возврат прихода»", 512).under(&[1157, 1194]),
    t(1131, Kind::Stlv, Some("buyTotals"), "счетчики операций «расход»", 512).under(&[1157, 1194]),
    t(1132, Kind::Stlv, Some("buyReturnTotals"), "счетчики операций «возврат расхода»", 512).under(&[1157, 1194]),
    t(1133, Kind::Stlv, Some("correctionTotals"), "счетчики операций по чекам коррекции", 512).under(&[1157, 1194]),
    t(1134, Kind::U32, Some("totalDocumentsCount"), "количество чеков и чеков коррекции со всеми признаками расчетов", 4).under(&[1157, 1194]),
    t(1135, Kind::U32, Some("receiptCount"), "количество чеков по признаку расчетов", 4).under(&[1129, 1130, 1131, 1132, 1133]),
    t(1136, Kind::Vln, Some("cashTotalSum"), "итоговая сумма в чеках наличными денежными средствами", 8).under(&[1129, 1130, 1131, 1132, 1133]),
    t(1138, Kind::Vln, Some("ecashTotalSum"), "итоговая сумма в чеках электронными средствами платежа", 8).under(&[1129, 1130, 1131, 1132, 1133]),
    t(1157, Kind::Stlv, Some("fnTotals"), "счетчики итогов ФН", 1024).under(&[6, 21]),
    t(1158, Kind::Stlv, Some("notTransmittedTotals"), "счетчики итогов непереданных ФД", 1024).under(&[21]),
    t(1162, Kind::Bytes, Some("productCode"), "код товарной номенклатуры", 32),
    t(1171, Kind::String, Some("providerPhone"), "телефон поставщика", 19),
    t(1173, Kind::Byte, Some("correctionType"), "тип коррекции", 1),
    t(1174, Kind::Stlv, Some("correctionBase"), "основание для коррекции", 292).under(&[31, 41]),
    t(1177, Kind::String, Some("correctionName"), "описание коррекции", 256).under(&[1174]),
    t(1178, Kind::UnixTime, Some("correctionDocumentDateTime"), "дата документа основания для коррекции", 4).under(&[1174]),
    t(1179, Kind::String, Some("correctionDocumentNumber"), "номер документа основания для коррекции", 32).under(&[1174]),
    t(1187, Kind::String, Some("retailPlace"), "место расчетов", 256),
    t(1188, Kind::String, Some("kktVersion"), "версия модели ККТ", 8),
    t(1189, Kind::Byte, Some("documentKktVersion"), "версия ФФД ККТ", 1),
    t(1190, Kind::Byte, Some("documentFnVersion"), "версия ФФД ФН", 1),
    t(1191, Kind::String, Some("propertiesItem"), "дополнительный реквизит предмета расчета", 64),
    t(1192, Kind::String, Some("propertiesData"), "дополнительный реквизит чека", 16),
    t(1193, Kind::Byte, Some("gamblingSign"), "признак проведения азартных игр", 1),
    t(1194, Kind::Stlv, Some("shiftTotals"), "счетчики итогов смены", 1024).under(&[5]),
    t(1201, Kind::Vln, Some("totalSum"), "общая итоговая сумма в чеках", 8).under(&[1129, 1130, 1131, 1132, 1133, 1194]),
    t(1203, Kind::String, Some("operatorInn"), "ИНН кассира", 12).under(&[1, 2, 3, 4, 5, 6, 11, 21, 31, 41]),
    t(1205, Kind::U32, Some("reregistrationReasonCodes"), "коды причин изменения сведений о ККТ", 4),
    t(1206, Kind::Byte, Some("operatorMessage"), "сообщение оператора для ККТ", 1),
    t(1207, Kind::Byte, Some("exciseDutyProductSign"), "признак торговли подакцизными товарами", 1),
    t(1209, Kind::Byte, Some("fiscalDocumentFormatVer"), "номер версии ФФД", 1),
    t(1212, Kind::Byte, Some("productType"), "признак предмета расчета", 1),
    t(1213, Kind::U32, Some("fdKeyResource"), "ресурс ключей ФП", 4),
    t(1214, Kind::Byte, Some("paymentType"), "признак способа расчета", 1),
    t(1215, Kind::Vln, Some("prepaidSum"), "сумма по чеку предоплатой", 6).under(&[3, 4, 31, 41]),
    t(1216, Kind::Vln, Some("creditSum"), "сумма по чеку постоплатой", 6).under(&[3, 4, 31, 41]),
    t(1217, Kind::Vln, Some("provisionSum"), "сумма по чеку встречным предоставлением", 6).under(&[3, 4, 31, 41]),
    t(1218, Kind::Vln, Some("prepaidSum"), "итоговая сумма в чеках предоплатами", 8).under(&[1129, 1130, 1131, 1132, 1133, 1194]),
    t(1219, Kind::Vln, Some("creditSum"), "итоговая сумма в чеках постоплатами", 8).under(&[1129, 1130, 1131, 1132, 1133, 1194]),
    t(1220, Kind::Vln, Some("provisionSum"), "итоговая сумма в чеках встречными предоставлениями", 8).under(&[1129, 1130, 1131, 1132, 1133, 1194]),
    t(1221, Kind::Byte, Some("printInMachineSign"), "признак установки принтера в автомате", 1),
    t(1222, Kind::Byte, Some("paymentAgentByProductType"), "признак агента по предмету расчета", 1),
    t(1223, Kind::Stlv, Some("agentData"), "данные агента", 512),
    t(1224, Kind::Stlv, Some("providerData"), "данные поставщика", 512),
    t(1225, Kind::String, Some("providerName"), "наименование поставщика", 256).under(&[1224]),
    t(1226, Kind::String, Some("providerInn"), "ИНН поставщика", 12).under(&[1224]),
];
